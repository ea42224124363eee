use anyhow::{Context, Result, anyhow};
use image::{DynamicImage, imageops::FilterType};
use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::{Color, Style},
  widgets::Widget,
};
use reqwest::Client;
use tracing::debug;

use crate::display::ThumbnailMode;
use crate::video::Video;

/// Download and decode a video's thumbnail, trying `standard` then `high`.
pub async fn fetch_thumbnail(client: &Client, video: &Video) -> Result<DynamicImage> {
  let candidates = [video.thumbnails.standard.as_ref(), video.thumbnails.high.as_ref()];
  for thumb in candidates.into_iter().flatten() {
    match client.get(&thumb.url).send().await {
      Ok(response) if response.status().is_success() => {
        let bytes = response.bytes().await.with_context(|| format!("Failed to read image bytes from {}", thumb.url))?;
        return image::load_from_memory(&bytes)
          .with_context(|| format!("Failed to decode thumbnail (URL: {})", thumb.url));
      }
      Ok(response) => debug!(url = %thumb.url, status = %response.status(), "thumbnail: variant unavailable"),
      Err(e) => debug!(url = %thumb.url, err = %e, "thumbnail: request failed"),
    }
  }
  Err(anyhow!("No thumbnail available for video {}", video.id))
}

/// Rows of pixels needed to fill `area` in the given mode.
/// Half-block packs two pixel rows into one cell.
pub fn pixel_size(area: Rect, mode: ThumbnailMode) -> (u32, u32) {
  let w = u32::from(area.width).max(1);
  let h = match mode {
    ThumbnailMode::HalfBlock => u32::from(area.height) * 2,
    _ => u32::from(area.height),
  };
  (w, h.max(1))
}

/// Resize an image so it exactly fills `area` for `mode`.
pub fn fit_to_area(image: &DynamicImage, area: Rect, mode: ThumbnailMode) -> DynamicImage {
  let (w, h) = pixel_size(area, mode);
  image.resize_to_fill(w, h, FilterType::Triangle)
}

const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Draws a pre-sized thumbnail (see [`fit_to_area`]).
pub struct ThumbnailWidget<'a> {
  pub image: &'a DynamicImage,
  pub mode: ThumbnailMode,
}

impl Widget for ThumbnailWidget<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
      return;
    }
    match self.mode {
      ThumbnailMode::HalfBlock => {
        let rgb = self.image.to_rgb8();
        for row in 0..area.height.min((rgb.height().div_ceil(2)) as u16) {
          for col in 0..area.width.min(rgb.width() as u16) {
            let top = rgb.get_pixel(u32::from(col), u32::from(row) * 2);
            let bottom_y = u32::from(row) * 2 + 1;
            let bg = if bottom_y < rgb.height() {
              let p = rgb.get_pixel(u32::from(col), bottom_y);
              Color::Rgb(p[0], p[1], p[2])
            } else {
              Color::Reset
            };
            buf.set_string(
              area.x + col,
              area.y + row,
              "▀",
              Style::default().fg(Color::Rgb(top[0], top[1], top[2])).bg(bg),
            );
          }
        }
      }
      ThumbnailMode::Ascii => {
        let luma = self.image.to_luma8();
        let steps = (ASCII_RAMP.len() - 1) as f32;
        for row in 0..area.height.min(luma.height() as u16) {
          let line: String = (0..area.width.min(luma.width() as u16))
            .map(|col| {
              let v = luma.get_pixel(u32::from(col), u32::from(row))[0];
              ASCII_RAMP[((f32::from(v) / 255.0) * steps).round() as usize] as char
            })
            .collect();
          buf.set_string(area.x, area.y + row, line, Style::default());
        }
      }
      ThumbnailMode::Off => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage};
  use ratatui::layout::Position;

  #[test]
  fn half_block_doubles_rows() {
    let area = Rect::new(0, 0, 10, 4);
    assert_eq!(pixel_size(area, ThumbnailMode::HalfBlock), (10, 8));
    assert_eq!(pixel_size(area, ThumbnailMode::Ascii), (10, 4));
  }

  #[test]
  fn ascii_renders_bright_and_dark() {
    let mut img = RgbImage::new(2, 1);
    img.put_pixel(0, 0, Rgb([0, 0, 0]));
    img.put_pixel(1, 0, Rgb([255, 255, 255]));
    let image = DynamicImage::ImageRgb8(img);

    let area = Rect::new(0, 0, 2, 1);
    let mut buf = Buffer::empty(area);
    ThumbnailWidget { image: &image, mode: ThumbnailMode::Ascii }.render(area, &mut buf);
    assert_eq!(buf[Position::new(0, 0)].symbol(), " ");
    assert_eq!(buf[Position::new(1, 0)].symbol(), "@");
  }

  #[test]
  fn half_block_sets_colors() {
    let mut img = RgbImage::new(1, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0]));
    img.put_pixel(0, 1, Rgb([0, 0, 255]));
    let image = DynamicImage::ImageRgb8(img);

    let area = Rect::new(0, 0, 1, 1);
    let mut buf = Buffer::empty(area);
    ThumbnailWidget { image: &image, mode: ThumbnailMode::HalfBlock }.render(area, &mut buf);
    let cell = &buf[Position::new(0, 0)];
    assert_eq!(cell.symbol(), "▀");
    assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
    assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
  }

  #[tokio::test]
  async fn video_without_thumbnails_is_an_error() {
    let mut video = crate::video::tests::sample_videos().remove(0);
    video.thumbnails = Default::default();
    let err = fetch_thumbnail(&Client::new(), &video).await.unwrap_err();
    assert!(err.to_string().contains("vacationVid1"));
  }
}

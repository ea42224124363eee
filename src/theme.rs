use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub muted: Color,
  pub accent: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub chip_fg: Color,
  pub status: Color,
  pub error: Color,
  pub key_fg: Color,
  pub key_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "Dusk",
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    muted: Color::Rgb(127, 132, 156),
    accent: Color::Rgb(245, 194, 231),
    border: Color::Rgb(88, 91, 112),
    highlight_fg: Color::Rgb(30, 30, 46),
    highlight_bg: Color::Rgb(180, 190, 254),
    stripe_bg: Color::Rgb(36, 36, 54),
    chip_fg: Color::Rgb(148, 226, 213),
    status: Color::Rgb(249, 226, 175),
    error: Color::Rgb(243, 139, 168),
    key_fg: Color::Rgb(30, 30, 46),
    key_bg: Color::Rgb(166, 173, 200),
  },
  Theme {
    name: "Paper",
    bg: Color::Rgb(250, 244, 237),
    fg: Color::Rgb(87, 82, 121),
    muted: Color::Rgb(152, 147, 165),
    accent: Color::Rgb(180, 99, 122),
    border: Color::Rgb(206, 202, 205),
    highlight_fg: Color::Rgb(250, 244, 237),
    highlight_bg: Color::Rgb(40, 105, 131),
    stripe_bg: Color::Rgb(242, 233, 222),
    chip_fg: Color::Rgb(86, 148, 159),
    status: Color::Rgb(234, 157, 52),
    error: Color::Rgb(180, 99, 122),
    key_fg: Color::Rgb(250, 244, 237),
    key_bg: Color::Rgb(121, 117, 147),
  },
  Theme {
    name: "Terminal",
    bg: Color::Reset,
    fg: Color::Reset,
    muted: Color::DarkGray,
    accent: Color::Cyan,
    border: Color::Gray,
    highlight_fg: Color::Black,
    highlight_bg: Color::Cyan,
    stripe_bg: Color::Reset,
    chip_fg: Color::Green,
    status: Color::Yellow,
    error: Color::Red,
    key_fg: Color::Black,
    key_bg: Color::Gray,
  },
];

pub fn theme_index(name: &str) -> Option<usize> {
  THEMES.iter().position(|t| t.name == name)
}

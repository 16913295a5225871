use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Cyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const PASS: Color = Color::Green;
pub const FAIL: Color = Color::Red;
pub const ADDRESS: Color = Color::BrightCyan;

use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0066d9a6);
pub const NEUTRAL: Color = Color::from_u32(0x003a3a3a);
pub const BACKGROUND: Color = Color::from_u32(0x00121212);
pub const HIGHLIGHT: Color = Color::from_u32(0x00f2c879);

use anstyle::{AnsiColor, Color, Style};

pub const HEADER: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
pub const SEPARATOR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue)));
pub const FAILURE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
pub const DIM: Style = Style::new().dimmed();

/// Separator width used when the terminal size is unknown
pub const FALLBACK_WIDTH: usize = 42;

use ratatui::style::Color;
use term_color_support::ColorSupport;

/// Extends Ratatui's Color so the board looks the same across terminals.
pub trait WTMatch {
    /// Map a standard ANSI color to the Windows Terminal (Campbell) palette,
    /// degraded to what the current terminal supports.
    fn wtmatch(self) -> Color;
}

impl WTMatch for Color {
    fn wtmatch(self) -> Color {
        let support = ColorSupport::stdout();

        // Some(((R, G, B), ANSI_256_Index))
        let mapping = match self {
            Color::Black =>         Some(((12, 12, 12),    232)),
            Color::Red =>           Some(((197, 15, 31),   160)),
            Color::Green =>         Some(((19, 161, 14),   28)),
            Color::Yellow =>        Some(((193, 156, 0),   178)),
            Color::Blue =>          Some(((0, 55, 218),    20)),
            Color::Magenta =>       Some(((136, 23, 152),  90)),
            Color::Cyan =>          Some(((58, 150, 221),  38)),
            Color::Gray =>          Some(((204, 204, 204), 250)),
            Color::DarkGray =>      Some(((118, 118, 118), 243)),
            Color::LightRed =>      Some(((231, 72, 86),   203)),
            Color::LightBlue =>     Some(((59, 120, 255),  63)),
            Color::White =>         Some(((242, 242, 242), 255)),
            _ => None,
        };

        match mapping {
            Some(((r, g, b), _)) if support.has_16m => Color::Rgb(r, g, b),
            Some((_, index256)) if support.has_256 => Color::Indexed(index256),
            _ => self,
        }
    }
}

/// Classic per-count color for a revealed number (1..=8)
pub fn number_color(n: u8) -> Color {
    let base = match n {
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::Magenta,
        5 => Color::Yellow,
        6 => Color::Cyan,
        7 => Color::Black,
        _ => Color::Gray,
    };
    base.wtmatch()
}

//! Color conversion between simulation colours and terminal colours.

use letterfall_core::Rgba;
use ratatui::style::Color;

/// Default paper the glyphs are inked on: a warm off-white.
pub const PAPER: Rgba = Rgba::opaque(244, 239, 228);

/// Convert an RGB triple to a terminal colour.
pub fn to_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Flatten a translucent colour over the paper into a terminal colour.
///
/// Terminals have no alpha channel, so every ink is resolved against the
/// backdrop it is painted on.
pub fn composite(ink: Rgba, paper: (u8, u8, u8)) -> Color {
    to_color(ink.over(paper))
}

/// Pick a readable foreground for text drawn on `paper`.
pub fn contrast_ink(paper: Rgba) -> Color {
    // Rec. 601 luma
    let luma = 0.299 * paper.r as f32 + 0.587 * paper.g as f32 + 0.114 * paper.b as f32;
    if luma > 140.0 {
        Color::Rgb(31, 29, 23)
    } else {
        Color::Rgb(236, 232, 222)
    }
}

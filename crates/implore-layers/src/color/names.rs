//! Named colors and the default categorical palette

use crate::colormap::Color;

/// Look up a color by name (case-insensitive)
pub fn named_color(name: &str) -> Option<Color> {
    let rgb = |hex: u32| {
        Color::rgb(
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        )
    };

    let color = match name.to_lowercase().as_str() {
        "black" | "k" => rgb(0x000000),
        "white" | "w" => rgb(0xFFFFFF),
        "red" | "r" => rgb(0xFF0000),
        "green" | "g" => rgb(0x008000),
        "blue" | "b" => rgb(0x0000FF),
        "lime" => rgb(0x00FF00),
        "yellow" | "y" => rgb(0xFFFF00),
        "cyan" | "c" | "aqua" => rgb(0x00FFFF),
        "magenta" | "m" | "fuchsia" => rgb(0xFF00FF),
        "gray" | "grey" => rgb(0x808080),
        "silver" => rgb(0xC0C0C0),
        "orange" => rgb(0xFFA500),
        "purple" => rgb(0x800080),
        "brown" => rgb(0xA52A2A),
        "pink" => rgb(0xFFC0CB),
        "navy" => rgb(0x000080),
        "teal" => rgb(0x008080),
        "olive" => rgb(0x808000),
        "maroon" => rgb(0x800000),
        "transparent" => Color::new(0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(color)
}

/// Palette assigned to categorical values when no cycle is configured
pub fn default_color_cycle() -> Vec<Color> {
    [
        0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F,
        0xBCBD22, 0x17BECF,
    ]
    .iter()
    .map(|&hex| {
        Color::rgb(
            ((hex >> 16) & 0xFF) as f32 / 255.0,
            ((hex >> 8) & 0xFF) as f32 / 255.0,
            (hex & 0xFF) as f32 / 255.0,
        )
    })
    .collect()
}

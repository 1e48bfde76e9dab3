use ratatui::style::Color;

/// Page palette
#[derive(Debug, Clone)]
pub struct Theme {
    // Dark page
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub faint: Color,
    pub dim: Color,
    pub rule: Color,
    pub card: Color,

    // Light section
    pub light_bg: Color,
    pub light_fg: Color,
    pub light_muted: Color,
    pub light_card: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x05, 0x05, 0x05),
            fg: Color::Rgb(0xff, 0xff, 0xff),
            muted: Color::Rgb(0x71, 0x71, 0x7a),
            faint: Color::Rgb(0x52, 0x52, 0x5b),
            dim: Color::Rgb(0x3f, 0x3f, 0x46),
            rule: Color::Rgb(0x18, 0x18, 0x1b),
            card: Color::Rgb(0x27, 0x27, 0x2a),
            light_bg: Color::Rgb(0xff, 0xff, 0xff),
            light_fg: Color::Rgb(0x00, 0x00, 0x00),
            light_muted: Color::Rgb(0xa1, 0xa1, 0xaa),
            light_card: Color::Rgb(0xf4, 0xf4, 0xf5),
        }
    }
}

impl Theme {
    /// `color` drawn at `opacity` over `background`
    ///
    /// Non-RGB colours cannot be blended and switch over at half opacity.
    pub fn fade(color: Color, background: Color, opacity: f64) -> Color {
        let t = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        match (color, background) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let mix = |c: u8, base: u8| {
                    (base as f64 + (c as f64 - base as f64) * t).round().clamp(0.0, 255.0) as u8
                };
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            _ if t >= 0.5 => color,
            _ => background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_blends_rgb() {
        let white = Color::Rgb(255, 255, 255);
        let black = Color::Rgb(0, 0, 0);
        assert_eq!(Theme::fade(white, black, 1.0), white);
        assert_eq!(Theme::fade(white, black, 0.0), black);
        assert_eq!(Theme::fade(white, black, 0.5), Color::Rgb(128, 128, 128));
    }

    #[test]
    fn test_fade_named_colors_switch() {
        assert_eq!(Theme::fade(Color::White, Color::Black, 0.7), Color::White);
        assert_eq!(Theme::fade(Color::White, Color::Black, 0.2), Color::Black);
    }
}

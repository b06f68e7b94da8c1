//! Style-to-visual-attribute resolution

use serde::Serialize;

use super::ClockStyle;

/// Font weight for the clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Visual attributes for one clock style.
///
/// The display layer applies these verbatim; the daemon only carries them
/// through the render payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub font_family: &'static str,
    pub weight: FontWeight,
    pub size_pt: f32,
    pub letter_spacing: f32,
    pub color: &'static str,
    pub glow_radius: f32,
    pub glow_color: &'static str,
}

const WHITE: &str = "#FFFFFF";
const NEON_CYAN: &str = "#00E5FF";
const MINIMAL_GRAY: &str = "#9E9E9E";
const RETRO_AMBER: &str = "#FFB000";

/// Resolve a clock style to its visual attributes. Pure and total over the
/// eight styles.
pub fn resolve(style: ClockStyle) -> Theme {
    match style {
        ClockStyle::Digital => Theme {
            font_family: "sans-serif-light",
            weight: FontWeight::Normal,
            size_pt: 96.0,
            letter_spacing: 0.0,
            color: WHITE,
            glow_radius: 0.0,
            glow_color: WHITE,
        },
        ClockStyle::Bold => Theme {
            font_family: "sans-serif-black",
            weight: FontWeight::Bold,
            size_pt: 110.0,
            letter_spacing: 0.0,
            color: WHITE,
            glow_radius: 0.0,
            glow_color: WHITE,
        },
        ClockStyle::BoldSquare => Theme {
            font_family: "sans-serif-black",
            weight: FontWeight::Bold,
            size_pt: 110.0,
            letter_spacing: 0.15,
            color: WHITE,
            glow_radius: 0.0,
            glow_color: WHITE,
        },
        ClockStyle::BoldCondensed => Theme {
            font_family: "sans-serif-condensed",
            weight: FontWeight::Bold,
            size_pt: 110.0,
            letter_spacing: -0.05,
            color: WHITE,
            glow_radius: 0.0,
            glow_color: WHITE,
        },
        ClockStyle::Neon => Theme {
            font_family: "sans-serif-medium",
            weight: FontWeight::Normal,
            size_pt: 100.0,
            letter_spacing: 0.0,
            color: NEON_CYAN,
            glow_radius: 30.0,
            glow_color: NEON_CYAN,
        },
        ClockStyle::Minimal => Theme {
            font_family: "sans-serif-thin",
            weight: FontWeight::Normal,
            size_pt: 90.0,
            letter_spacing: 0.0,
            color: MINIMAL_GRAY,
            glow_radius: 0.0,
            glow_color: MINIMAL_GRAY,
        },
        ClockStyle::Outlined => Theme {
            font_family: "sans-serif",
            weight: FontWeight::Bold,
            size_pt: 96.0,
            letter_spacing: 0.0,
            color: WHITE,
            glow_radius: 12.0,
            glow_color: MINIMAL_GRAY,
        },
        ClockStyle::Retro => Theme {
            font_family: "monospace",
            weight: FontWeight::Normal,
            size_pt: 88.0,
            letter_spacing: 0.0,
            color: RETRO_AMBER,
            glow_radius: 0.0,
            glow_color: RETRO_AMBER,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_total_over_all_styles() {
        for style in ClockStyle::ALL {
            let theme = resolve(style);
            assert!(theme.size_pt > 0.0, "{:?} has no size", style);
            assert!(!theme.font_family.is_empty());
        }
    }

    #[test]
    fn neon_glows_and_digital_does_not() {
        assert!(resolve(ClockStyle::Neon).glow_radius > 0.0);
        assert_eq!(resolve(ClockStyle::Digital).glow_radius, 0.0);
    }

    #[test]
    fn retro_uses_monospace_amber() {
        let theme = resolve(ClockStyle::Retro);
        assert_eq!(theme.font_family, "monospace");
        assert_eq!(theme.color, RETRO_AMBER);
    }
}

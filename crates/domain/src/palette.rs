//! Palettes and the theme resolver.
//!
//! Exactly two palettes exist, [`LIGHT`] and [`DARK`]. Both are fully spelled
//! out as static data; no color is derived from another at runtime.

use serde::Serialize;

use crate::display_mode::DisplayMode;

/// A CSS-style hex color such as `#0f172a`.
pub type Color = &'static str;

/// A two-stop gradient, `[start, end]`.
pub type Gradient = [Color; 2];

/// Style hint for the platform status bar text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    /// Light text, for dark backgrounds.
    LightContent,
    /// Dark text, for light backgrounds.
    DarkContent,
}

/// Two-stop gradients per semantic role.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Gradients {
    pub background: Gradient,
    pub surface: Gradient,
    pub primary: Gradient,
    pub success: Gradient,
    pub warning: Gradient,
    pub danger: Gradient,
    pub muted: Gradient,
    pub empty: Gradient,
}

/// Backgrounds of text inputs.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Backgrounds {
    pub input: Color,
    pub edit_input: Color,
}

/// The complete set of colors for one [`DisplayMode`].
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub shadow: Color,
    pub gradients: Gradients,
    pub backgrounds: Backgrounds,
    pub status_bar_style: StatusBarStyle,
}

pub static LIGHT: Palette = Palette {
    background: "#f8fafc",
    surface: "#ffffff",
    text: "#1e293b",
    text_muted: "#64748b",
    border: "#e2e8f0",
    primary: "#3b82f6",
    success: "#10b981",
    warning: "#f59e0b",
    danger: "#ef4444",
    shadow: "#000000",
    gradients: Gradients {
        background: ["#f8fafc", "#e2e8f0"],
        surface: ["#ffffff", "#f8fafc"],
        primary: ["#3b82f6", "#1d4ed8"],
        success: ["#10b981", "#059669"],
        warning: ["#f59e0b", "#d97706"],
        danger: ["#ef4444", "#dc2626"],
        muted: ["#9ca3af", "#6b7280"],
        empty: ["#f3f4f6", "#e5e7eb"],
    },
    backgrounds: Backgrounds {
        input: "#ffffff",
        edit_input: "#ffffff",
    },
    status_bar_style: StatusBarStyle::DarkContent,
};

pub static DARK: Palette = Palette {
    background: "#0f172a",
    surface: "#1e293b",
    text: "#f1f5f9",
    text_muted: "#94a3b8",
    border: "#334155",
    primary: "#60a5fa",
    success: "#34d399",
    warning: "#fbbf24",
    danger: "#f87171",
    shadow: "#000000",
    gradients: Gradients {
        background: ["#0f172a", "#1e293b"],
        surface: ["#1e293b", "#334155"],
        primary: ["#3b82f6", "#1d4ed8"],
        success: ["#10b981", "#059669"],
        warning: ["#f59e0b", "#d97706"],
        danger: ["#ef4444", "#dc2626"],
        muted: ["#374151", "#4b5563"],
        empty: ["#374151", "#4b5563"],
    },
    backgrounds: Backgrounds {
        input: "#1e293b",
        edit_input: "#0f172a",
    },
    status_bar_style: StatusBarStyle::LightContent,
};

/// A display mode paired with its palette, as handed to a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub mode: DisplayMode,
    pub palette: &'static Palette,
}

impl Theme {
    #[must_use]
    pub fn for_mode(mode: DisplayMode) -> Self {
        Self {
            mode,
            palette: resolve(mode),
        }
    }
}

/// Map a display mode to its palette.
///
/// Always returns one of the two statics, so repeated calls with the same
/// mode yield the same reference.
#[must_use]
pub fn resolve(mode: DisplayMode) -> &'static Palette {
    match mode {
        DisplayMode::Light => &LIGHT,
        DisplayMode::Dark => &DARK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_same_static_for_repeated_calls() {
        assert!(std::ptr::eq(resolve(DisplayMode::Light), resolve(DisplayMode::Light)));
        assert!(std::ptr::eq(resolve(DisplayMode::Dark), resolve(DisplayMode::Dark)));
        assert!(std::ptr::eq(resolve(DisplayMode::Light), &LIGHT));
        assert!(std::ptr::eq(resolve(DisplayMode::Dark), &DARK));
    }

    #[test]
    fn should_pair_mode_with_resolved_palette() {
        let theme = Theme::for_mode(DisplayMode::Dark);
        assert_eq!(theme.mode, DisplayMode::Dark);
        assert!(std::ptr::eq(theme.palette, &DARK));
    }

    #[test]
    fn should_differ_structurally_between_modes() {
        assert_ne!(resolve(DisplayMode::Light), resolve(DisplayMode::Dark));
    }

    #[test]
    fn should_pair_status_bar_style_with_background_brightness() {
        assert_eq!(LIGHT.status_bar_style, StatusBarStyle::DarkContent);
        assert_eq!(DARK.status_bar_style, StatusBarStyle::LightContent);
    }

    #[test]
    fn should_start_background_gradient_at_background_color() {
        for palette in [&LIGHT, &DARK] {
            assert_eq!(palette.gradients.background[0], palette.background);
        }
    }

    #[test]
    fn should_only_contain_hex_colors() {
        for palette in [&LIGHT, &DARK] {
            let json = serde_json::to_value(palette).unwrap();
            let mut colors = Vec::new();
            collect_strings(&json, &mut colors);
            for color in colors.iter().filter(|c| !c.ends_with("-content")) {
                assert!(color.starts_with('#') && color.len() == 7, "bad color {color}");
                assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
            }
        }
    }

    #[test]
    fn should_serialize_status_bar_style_in_kebab_case() {
        let json = serde_json::to_value(&DARK).unwrap();
        assert_eq!(json["status_bar_style"], "light-content");
        assert_eq!(json["gradients"]["muted"][1], "#4b5563");
    }

    fn collect_strings(value: &serde_json::Value, out: &mut Vec<String>) {
        match value {
            serde_json::Value::String(s) => out.push(s.clone()),
            serde_json::Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
            serde_json::Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
            _ => {}
        }
    }
}

// File: src/marker.rs
// Magnitude -> marker styling, and the per-theme palette used to paint it

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Severity class of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Green,
    Orange,
    Red,
    /// Event published without a magnitude.
    Unknown,
}

pub const BASE_DIAMETER_PX: f64 = 10.0;
pub const DIAMETER_PX_PER_MAG: f64 = 3.0;

/// green below 3, orange below 5, red otherwise.
pub fn magnitude_color(mag: f64) -> MarkerColor {
    if mag < 3.0 {
        MarkerColor::Green
    } else if mag < 5.0 {
        MarkerColor::Orange
    } else {
        MarkerColor::Red
    }
}

/// `10 + 3m` pixels. Not clamped: magnitudes below -10/3 give a non-positive size.
pub fn marker_diameter(mag: f64) -> f64 {
    BASE_DIAMETER_PX + mag * DIAMETER_PX_PER_MAG
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: MarkerColor,
    pub diameter_px: f64,
}

impl MarkerStyle {
    pub fn for_magnitude(mag: Option<f64>) -> Self {
        match mag {
            Some(m) => Self {
                color: magnitude_color(m),
                diameter_px: marker_diameter(m),
            },
            None => Self {
                color: MarkerColor::Unknown,
                diameter_px: BASE_DIAMETER_PX,
            },
        }
    }
}

/// RGB in [0.0, 1.0]. Dark theme uses brighter tones so markers stay legible on dark tiles.
pub fn palette(color: MarkerColor, theme: Theme) -> (f32, f32, f32) {
    match (theme, color) {
        (Theme::Light, MarkerColor::Green) => (0.0, 0.50, 0.0),
        (Theme::Light, MarkerColor::Orange) => (1.0, 0.65, 0.0),
        (Theme::Light, MarkerColor::Red) => (1.0, 0.0, 0.0),
        (Theme::Light, MarkerColor::Unknown) => (0.50, 0.50, 0.50),
        (Theme::Dark, MarkerColor::Green) => (0.40, 0.90, 0.40),
        (Theme::Dark, MarkerColor::Orange) => (1.0, 0.75, 0.30),
        (Theme::Dark, MarkerColor::Red) => (1.0, 0.35, 0.35),
        (Theme::Dark, MarkerColor::Unknown) => (0.75, 0.75, 0.75),
    }
}

/// Determines if text on top of this color should be white.
pub fn is_dark(r: f32, g: f32, b: f32) -> bool {
    let brightness = 0.299 * r + 0.587 * g + 0.114 * b;
    brightness < 0.5
}

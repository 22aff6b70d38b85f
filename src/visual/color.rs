//! Color scheme palettes shared by the visual algorithms.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Rainbow,
    Monochrome,
    Warm,
    Cool,
    Neon,
}

impl ColorScheme {
    /// Resolve a scheme name, falling back to rainbow on anything unknown.
    pub fn resolve(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "rainbow" => Self::Rainbow,
            "monochrome" => Self::Monochrome,
            "warm" => Self::Warm,
            "cool" => Self::Cool,
            "neon" => Self::Neon,
            other => {
                log::warn!("Unknown color scheme '{}', using rainbow", other);
                Self::Rainbow
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Monochrome => "monochrome",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Neon => "neon",
        }
    }

    /// Map an abstract hue (degrees) and amplitude-derived value into the
    /// scheme's palette. The value floor keeps zero-amplitude geometry
    /// visible against the faded background.
    pub fn shade(&self, hue_deg: f32, value: f32) -> [u8; 3] {
        let h = hue_deg.rem_euclid(360.0);
        let v = value.clamp(0.0, 1.0);
        match self {
            Self::Rainbow => hsv_to_rgb(h, 1.0, 0.35 + 0.65 * v),
            Self::Monochrome => {
                let g = (40.0 + 215.0 * v) as u8;
                [g, g, g]
            }
            Self::Warm => hsv_to_rgb(h / 6.0, 0.9, 0.4 + 0.6 * v),
            Self::Cool => hsv_to_rgb(180.0 + h / 3.0, 0.8, 0.4 + 0.6 * v),
            Self::Neon => hsv_to_rgb(h, 1.0, 0.85 + 0.15 * v),
        }
    }

    /// Bottom/top stops for the spectrum bar gradient.
    pub fn gradient(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            Self::Rainbow => ([80, 0, 160], [0, 220, 255]),
            Self::Monochrome => ([60, 60, 60], [235, 235, 235]),
            Self::Warm => ([160, 20, 0], [255, 200, 40]),
            Self::Cool => ([0, 40, 120], [80, 230, 255]),
            Self::Neon => ([255, 0, 180], [0, 255, 160]),
        }
    }
}

pub fn hsv_to_rgb(h_deg: f32, s: f32, v: f32) -> [u8; 3] {
    let h = h_deg.rem_euclid(360.0) / 60.0;
    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

pub fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
    }

    #[test]
    fn hue_wraps_past_360() {
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), hsv_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), hsv_to_rgb(240.0, 1.0, 1.0));
    }

    #[test]
    fn unknown_scheme_falls_back_to_rainbow() {
        assert_eq!(ColorScheme::resolve("plasma"), ColorScheme::Rainbow);
        assert_eq!(ColorScheme::resolve("NEON"), ColorScheme::Neon);
    }

    #[test]
    fn monochrome_ignores_hue() {
        let a = ColorScheme::Monochrome.shade(0.0, 0.5);
        let b = ColorScheme::Monochrome.shade(180.0, 0.5);
        assert_eq!(a, b);
        assert_eq!(a[0], a[1]);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_rgb([0, 0, 0], [255, 255, 255], 0.0), [0, 0, 0]);
        assert_eq!(lerp_rgb([0, 0, 0], [255, 255, 255], 1.0), [255, 255, 255]);
    }
}

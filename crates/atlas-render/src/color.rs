//! Color breaks and the linear ramp built from them.

use anyhow::{Result, bail};

/// Fill for territories without a score.
pub const MISSING_FILL: &str = "#EBEBEB";

/// Edge color around every territory.
pub const EDGE_COLOR: &str = "white";

/// Default break palettes, indexed by break count minus one.
const DEFAULT_PALETTES: [&[&str]; 5] = [
    &["#B49A67"],
    &["#B49A67", "#001A23"],
    &["#98473E", "#B49A67", "#001A23"],
    &["#98473E", "#B49A67", "#395E66", "#001A23"],
    &["#98473E", "#B49A67", "#7A9E7E", "#395E66", "#001A23"],
];

/// Default number of color breaks.
pub const DEFAULT_BREAKS: usize = 4;

/// The default palette for a break count between 2 and 5.
pub fn default_palette(breaks: usize) -> Result<Vec<String>> {
    if !(2..=5).contains(&breaks) {
        bail!("break count must be between 2 and 5, got {breaks}");
    }
    Ok(DEFAULT_PALETTES[breaks - 1]
        .iter()
        .map(|&hex| hex.to_string())
        .collect())
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a `#RRGGBB` hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid color '{hex}' (expected #RRGGBB)");
        }
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(anyhow::Error::from)
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Piecewise-linear color ramp through the break colors, evenly spaced
/// over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    /// Build a ramp from hex break colors; at least two are required.
    pub fn from_breaks(breaks: &[String]) -> Result<Self> {
        if breaks.len() < 2 {
            bail!("a color ramp needs at least two breaks, got {}", breaks.len());
        }
        let stops = breaks
            .iter()
            .map(|hex| Rgb::from_hex(hex))
            .collect::<Result<Vec<Rgb>>>()?;
        Ok(Self { stops })
    }

    /// Sample the ramp at `t`, clamped to `[0, 1]`.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f64;
        let a = self.stops[index];
        let b = self.stops[index + 1];
        let mix = |x: u8, y: u8| -> u8 {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8
        };
        Rgb {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_are_the_break_colors() {
        let ramp = ColorRamp::from_breaks(&[
            "#98473E".to_string(),
            "#B49A67".to_string(),
            "#001A23".to_string(),
        ])
        .unwrap();
        assert_eq!(ramp.sample(0.0).to_hex(), "#98473E");
        assert_eq!(ramp.sample(1.0).to_hex(), "#001A23");
        assert_eq!(ramp.sample(0.5).to_hex(), "#B49A67");
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let ramp =
            ColorRamp::from_breaks(&["#000000".to_string(), "#FFFFFF".to_string()]).unwrap();
        assert_eq!(ramp.sample(-1.0), ramp.sample(0.0));
        assert_eq!(ramp.sample(2.0), ramp.sample(1.0));
    }

    #[test]
    fn midpoint_interpolates_linearly() {
        let ramp =
            ColorRamp::from_breaks(&["#000000".to_string(), "#FFFFFF".to_string()]).unwrap();
        let mid = ramp.sample(0.5);
        assert_eq!(mid, Rgb { r: 128, g: 128, b: 128 });
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("blue").is_err());
        assert!(Rgb::from_hex("#12345G").is_err());
    }

    #[test]
    fn default_palettes_cover_two_to_five_breaks() {
        for n in 2..=5 {
            assert_eq!(default_palette(n).unwrap().len(), n);
        }
        assert!(default_palette(1).is_err());
        assert!(default_palette(6).is_err());
    }
}

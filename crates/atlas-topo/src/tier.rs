//! Fixed simplification tiers.
//!
//! Tier labels name the nominal scale of the output map; the epsilon is
//! the Visvalingam–Whyatt area threshold in squared degrees, tuned against
//! the source boundary snapshot. Tiers are independent: each one is
//! derived from the full-resolution topology, never from a coarser tier.

use std::fmt;
use std::str::FromStr;

use atlas_model::AtlasError;

/// One output scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// 1:10m nominal scale, near-lossless.
    M10,
    /// 1:30m nominal scale.
    M30,
    /// 1:50m nominal scale.
    M50,
    /// 1:100m nominal scale, coarsest shipped tier.
    M100,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::M10, Tier::M30, Tier::M50, Tier::M100];

    /// Visvalingam–Whyatt area threshold for this tier.
    pub fn epsilon(self) -> f64 {
        match self {
            Tier::M10 => 0.000_090,
            Tier::M30 => 0.000_245,
            Tier::M50 => 0.000_350,
            Tier::M100 => 0.001,
        }
    }

    /// Short label used in file names and the CLI.
    pub fn label(self) -> &'static str {
        match self {
            Tier::M10 => "10m",
            Tier::M30 => "30m",
            Tier::M50 => "50m",
            Tier::M100 => "100m",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tier {
    type Err = AtlasError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "10m" => Ok(Tier::M10),
            "30m" => Ok(Tier::M30),
            "50m" => Ok(Tier::M50),
            "100m" => Ok(Tier::M100),
            other => Err(AtlasError::Message(format!(
                "unknown tier '{other}' (expected one of: 10m, 30m, 50m, 100m)"
            ))),
        }
    }
}

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use clap::ValueEnum;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use color_eyre::eyre::bail;
use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumIter;
use strum::EnumString;
use strum::IntoEnumIterator;

/// Column count used for breakpoint names missing from the table
pub const DEFAULT_COLUMNS: i32 = 12;

/// Number of narrowest tiers that stack widgets in a single full-width column
pub const DEFAULT_MOBILE_TIERS: usize = 2;

#[derive(
    Clone,
    Copy,
    Debug,
    Serialize,
    Deserialize,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    ValueEnum,
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
/// The standard screen-size tiers, narrowest first
pub enum DefaultBreakpoint {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

impl DefaultBreakpoint {
    #[must_use]
    pub const fn columns(&self) -> i32 {
        match self {
            Self::Xxs | Self::Xs => 4,
            Self::Sm => 6,
            Self::Md => 8,
            Self::Lg => 10,
            Self::Xl => 12,
            Self::Xxl => 14,
            Self::Xxxl => 16,
        }
    }

    /// Minimum viewport width in pixels at which this tier applies
    #[must_use]
    pub const fn pixel_width(&self) -> u32 {
        match self {
            Self::Xxs => 0,
            Self::Xs => 480,
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 996,
            Self::Xl => 1200,
            Self::Xxl => 1600,
            Self::Xxxl => 1920,
        }
    }

    /// Height of one grid row in pixels
    #[must_use]
    pub const fn pixel_height(&self) -> u32 {
        match self {
            Self::Xxs | Self::Xs => 40,
            Self::Sm | Self::Md => 48,
            Self::Lg | Self::Xl => 56,
            Self::Xxl | Self::Xxxl => 64,
        }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier {
            name: self.to_string(),
            columns: self.columns(),
            pixel_width: self.pixel_width(),
            pixel_height: self.pixel_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// One screen-size tier and its grid
pub struct Tier {
    /// Breakpoint identifier
    pub name: String,
    /// Number of grid columns
    pub columns: i32,
    /// Minimum viewport width in pixels
    pub pixel_width: u32,
    /// Row height in pixels
    pub pixel_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
/// Breakpoint configuration table, ordered from narrowest to widest
pub struct Breakpoints {
    pub tiers: Vec<Tier>,
    /// How many of the narrowest tiers stack widgets vertically
    #[serde(default = "default_mobile_tiers")]
    pub mobile_tiers: usize,
}

const fn default_mobile_tiers() -> usize {
    DEFAULT_MOBILE_TIERS
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tiers: DefaultBreakpoint::iter().map(|b| b.tier()).collect(),
            mobile_tiers: DEFAULT_MOBILE_TIERS,
        }
    }
}

impl Breakpoints {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let breakpoints: Self = match path.extension() {
            Some(extension) if extension == "yaml" || extension == "yml" => {
                serde_yaml::from_reader(BufReader::new(File::open(path)?))?
            }
            Some(extension) if extension == "json" => {
                serde_json::from_reader(BufReader::new(File::open(path)?))?
            }
            _ => bail!("breakpoint tables must be json or yaml files"),
        };

        breakpoints
            .validate()
            .wrap_err_with(|| format!("invalid breakpoint table: {}", path.display()))?;

        Ok(breakpoints)
    }

    pub fn read_raw(raw: &str) -> Result<Self> {
        let breakpoints: Self = serde_json::from_str(raw)?;
        breakpoints.validate()?;
        Ok(breakpoints)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            bail!("at least one breakpoint tier is required");
        }

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if tier.columns < 1 {
                bail!(
                    "breakpoint '{}' must have at least one column, found {}",
                    tier.name,
                    tier.columns
                );
            }

            if !seen.insert(tier.name.as_str()) {
                bail!("breakpoint '{}' is defined more than once", tier.name);
            }
        }

        for pair in self.tiers.windows(2) {
            if pair[0].pixel_width >= pair[1].pixel_width {
                bail!(
                    "breakpoint '{}' ({}px) must be narrower than '{}' ({}px)",
                    pair[0].name,
                    pair[0].pixel_width,
                    pair[1].name,
                    pair[1].pixel_width
                );
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn tier(&self, breakpoint: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name == breakpoint)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|t| t.name.as_str())
    }

    /// Column count for a breakpoint, or [`DEFAULT_COLUMNS`] when the name is
    /// not in the table.
    #[must_use]
    pub fn columns(&self, breakpoint: &str) -> i32 {
        match self.tier(breakpoint) {
            Some(tier) => tier.columns.max(1),
            None => {
                tracing::debug!(
                    "unknown breakpoint '{}', using {} columns",
                    breakpoint,
                    DEFAULT_COLUMNS
                );
                DEFAULT_COLUMNS
            }
        }
    }

    /// Whether a breakpoint is one of the narrow tiers that stack widgets.
    #[must_use]
    pub fn is_mobile(&self, breakpoint: &str) -> bool {
        self.tiers
            .iter()
            .take(self.mobile_tiers)
            .any(|t| t.name == breakpoint)
    }

    /// Widest tier whose minimum width fits within `width` pixels, falling back
    /// to the narrowest tier.
    #[must_use]
    pub fn classify_width(&self, width: u32) -> Option<&Tier> {
        self.tiers
            .iter()
            .rev()
            .find(|t| t.pixel_width <= width)
            .or_else(|| self.tiers.first())
    }
}

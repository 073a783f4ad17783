//! Industry identifiers and their display metadata.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::VeriPuraError;

/// The industry modules a transaction can be simulated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Food,
    Fashion,
    PetFood,
    Cosmetics,
    Pharma,
}

impl Industry {
    /// Every industry, in sidebar order.
    pub const ALL: [Industry; 5] = [
        Industry::Food,
        Industry::Fashion,
        Industry::PetFood,
        Industry::Cosmetics,
        Industry::Pharma,
    ];

    /// Display label, also embedded verbatim in the generation prompt.
    pub fn label(self) -> &'static str {
        match self {
            Industry::Food => "Food Import",
            Industry::Fashion => "Fashion & Textile",
            Industry::PetFood => "Pet Food",
            Industry::Cosmetics => "Cosmetics",
            Industry::Pharma => "Pharmaceutical",
        }
    }

    /// Short key used on the command line and in settings files.
    pub fn key(self) -> &'static str {
        match self {
            Industry::Food => "food",
            Industry::Fashion => "fashion",
            Industry::PetFood => "pet-food",
            Industry::Cosmetics => "cosmetics",
            Industry::Pharma => "pharma",
        }
    }

    /// The industry after this one, wrapping around.
    pub fn next(self) -> Industry {
        let idx = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The industry before this one, wrapping around.
    pub fn previous(self) -> Industry {
        let idx = Self::ALL.iter().position(|i| *i == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = VeriPuraError;

    /// Accepts either the short key (`pet-food`) or the display label
    /// (`Pet Food`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Industry::ALL
            .into_iter()
            .find(|i| {
                i.key().eq_ignore_ascii_case(wanted) || i.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| VeriPuraError::ConfigError {
                reason: format!("unknown industry '{wanted}'"),
            })
    }
}

/// Display metadata for one industry module.
///
/// Built once from static data and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryConfig {
    /// Single emoji shown before the industry label.
    pub icon: &'static str,
    /// Annual trade volume handled by the module, e.g. "$296B".
    pub market_size: &'static str,
    /// The compliance pain point, one or two sentences.
    pub problem: &'static str,
    /// What the module does about it, one point per line in the header.
    pub solution_points: &'static [&'static str],
}

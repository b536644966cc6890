//! Calendar seasons and per-category seasonal multipliers

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar season, derived purely from the month. No timezone or locale
/// sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Dec-Feb winter, Mar-May spring, Jun-Aug summer, else autumn
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn current() -> Self {
        Self::from_month(Utc::now().month())
    }

    /// Ranking multiplier for a catalog category in this season.
    /// Unlisted categories are neutral.
    pub fn multiplier(&self, category: &str) -> f32 {
        let table: &[(&str, f32)] = match self {
            Season::Winter => &[("Jacket", 1.8), ("Gloves", 1.6), ("Hoodie", 1.4), ("Pants", 1.2)],
            Season::Summer => &[("Jacket", 0.6), ("Gloves", 0.4), ("Hoodie", 0.7), ("Pants", 1.4)],
            Season::Spring => &[("Jacket", 1.2), ("Gloves", 0.8), ("Hoodie", 1.3), ("Pants", 1.5)],
            Season::Autumn => &[("Jacket", 1.5), ("Gloves", 1.2), ("Hoodie", 1.6), ("Pants", 1.3)],
        };
        table
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(1.0)
    }
}

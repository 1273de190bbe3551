use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{Month, Usd};

/// Macro market regime driving the base monthly price drift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketScenario {
    Bull,
    Bear,
    #[default]
    Stable,
    /// Sharp drawdown for three months, then a slow recovery
    Crash,
    /// No base drift; price moves only through scheduled events and noise
    Custom,
}

impl MarketScenario {
    pub fn all() -> [Self; 5] {
        [Self::Bull, Self::Bear, Self::Stable, Self::Crash, Self::Custom]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
            Self::Stable => "stable",
            Self::Crash => "crash",
            Self::Custom => "custom",
        }
    }

    /// Relative severity used by the composite risk score (0-1)
    pub fn severity(&self) -> f64 {
        match self {
            Self::Bull => 0.2,
            Self::Stable => 0.3,
            Self::Custom => 0.5,
            Self::Bear => 0.6,
            Self::Crash => 0.9,
        }
    }
}

impl fmt::Display for MarketScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discrete market event applied additively in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub month: Month,
    /// Price impact in percent (e.g. -20.0 for a 20% shock)
    pub impact: f64,
    #[serde(default)]
    pub description: String,
}

impl ScheduledEvent {
    pub fn new(month: Month, impact: f64, description: impl Into<String>) -> Self {
        Self {
            month,
            impact,
            description: description.into(),
        }
    }
}

/// Market-condition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConditions {
    pub scenario: MarketScenario,
    /// Scales the scenario's base drift (0.1-3.0)
    pub multiplier: f64,
    /// Width of the uniform monthly noise term (0.01-1.0)
    pub volatility_factor: f64,
    /// Listing price
    pub initial_price: Usd,
    /// Reference asset whose history is blended into the drift
    pub reference_asset: String,
    pub events: Vec<ScheduledEvent>,
}

impl Default for MarketConditions {
    fn default() -> Self {
        Self {
            scenario: MarketScenario::Stable,
            multiplier: 1.0,
            volatility_factor: 0.1,
            initial_price: 0.10,
            reference_asset: "ethereum".to_string(),
            events: Vec::new(),
        }
    }
}

impl MarketConditions {
    /// Sum of scheduled impacts (percent) landing in `month`
    pub fn event_impact(&self, month: Month) -> f64 {
        self.events
            .iter()
            .filter(|e| e.month == month)
            .map(|e| e.impact)
            .sum()
    }
}

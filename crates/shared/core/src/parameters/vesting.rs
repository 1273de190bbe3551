use serde::{Deserialize, Serialize};

use crate::values::{Month, Tokens};

/// Linear vesting with a cliff and a front-loaded unlock for one allocation group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Group name (e.g. "Team", "Advisors", "Seed")
    pub name: String,
    /// Tokens allocated to the group
    pub total_tokens: Tokens,
    /// Months before linear vesting starts
    pub cliff_months: Month,
    /// Length of the linear vesting after the cliff
    pub vesting_months: Month,
    /// Percent of `total_tokens` released at month 0 (0-100)
    pub initial_unlock: f64,
}

impl VestingSchedule {
    pub fn new(
        name: impl Into<String>,
        total_tokens: Tokens,
        cliff_months: Month,
        vesting_months: Month,
        initial_unlock: f64,
    ) -> Self {
        Self {
            name: name.into(),
            total_tokens,
            cliff_months,
            vesting_months,
            initial_unlock,
        }
    }

    /// Tokens released at month 0
    pub fn initial_unlock_tokens(&self) -> Tokens {
        self.total_tokens * self.initial_unlock / 100.0
    }

    /// Tokens released linearly after the cliff
    pub fn vestable_tokens(&self) -> Tokens {
        self.total_tokens * (1.0 - self.initial_unlock / 100.0)
    }

    /// First month at which the group is fully vested (saturates at `Month::MAX`)
    pub fn fully_vested_month(&self) -> Month {
        self.cliff_months.saturating_add(self.vesting_months)
    }

    /// Team and advisor allocations count toward insider concentration
    pub fn is_insider(&self) -> bool {
        let name = self.name.to_lowercase();
        name.contains("team") || name.contains("advisor")
    }
}

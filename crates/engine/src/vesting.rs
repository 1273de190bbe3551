//! Vesting Engine
//!
//! Linear vesting with a cliff and a front-loaded unlock. The initial unlock
//! is credited at month 0 (it is part of the initial circulating supply);
//! the monthly deltas only cover the linear portion. Deterministic.

use tokenomics_core::{Month, Tokens, VestingEvent, VestingGroupSummary, VestingSchedule};

/// Fraction of the linear pool vested after `months_after_cliff` months
fn progress(schedule: &VestingSchedule, months_after_cliff: Month) -> f64 {
    (months_after_cliff as f64 / schedule.vesting_months.max(1) as f64).min(1.0)
}

/// Linear-portion tokens vested by the end of `month`
fn linear_vested(schedule: &VestingSchedule, month: Month) -> Tokens {
    if month <= schedule.cliff_months {
        return 0.0;
    }
    schedule.vestable_tokens() * progress(schedule, month - schedule.cliff_months)
}

/// Tokens newly unlocked for one group in `month`
pub fn group_newly_vested(schedule: &VestingSchedule, month: Month) -> Tokens {
    if month <= schedule.cliff_months {
        return 0.0;
    }
    let months_after_cliff = month - schedule.cliff_months;
    let vestable = schedule.vestable_tokens();
    let current = vestable * progress(schedule, months_after_cliff);
    let previous = vestable * progress(schedule, months_after_cliff - 1);
    (current - previous).max(0.0)
}

/// Total tokens newly unlocked across all groups in `month`
pub fn newly_vested(schedules: &[VestingSchedule], month: Month) -> Tokens {
    schedules
        .iter()
        .map(|s| group_newly_vested(s, month))
        .sum()
}

/// Initial unlock plus everything vested linearly by the end of `month`
pub fn cumulative_vested(schedule: &VestingSchedule, month: Month) -> Tokens {
    schedule.initial_unlock_tokens() + linear_vested(schedule, month)
}

/// Tokens released at month 0 across all groups
pub fn initial_unlock_total(schedules: &[VestingSchedule]) -> Tokens {
    schedules
        .iter()
        .map(VestingSchedule::initial_unlock_tokens)
        .sum()
}

/// Every positive monthly unlock over the horizon, in month order
pub fn vesting_events(schedules: &[VestingSchedule], months: Month) -> Vec<VestingEvent> {
    let mut events = Vec::new();
    for month in 0..months {
        for schedule in schedules {
            let tokens = group_newly_vested(schedule, month);
            if tokens > 0.0 {
                events.push(VestingEvent {
                    month,
                    group: schedule.name.clone(),
                    tokens,
                });
            }
        }
    }
    events
}

/// Per-group vesting outlook at the end of the horizon
pub fn vesting_summary(schedules: &[VestingSchedule], months: Month) -> Vec<VestingGroupSummary> {
    let last_month = months.saturating_sub(1);
    schedules
        .iter()
        .map(|s| {
            let vested = cumulative_vested(s, last_month);
            let percent = if s.total_tokens > 0.0 {
                vested / s.total_tokens * 100.0
            } else {
                0.0
            };
            VestingGroupSummary {
                group: s.name.clone(),
                total_tokens: s.total_tokens,
                initial_unlock_tokens: s.initial_unlock_tokens(),
                cliff_end_month: s.cliff_months,
                fully_vested_month: s.fully_vested_month(),
                vested_by_horizon: vested,
                percent_vested_by_horizon: percent,
            }
        })
        .collect()
}

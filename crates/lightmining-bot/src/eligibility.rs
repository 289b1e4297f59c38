/*
[INPUT]:  Server-reported last mining time and current wall clock
[OUTPUT]: Eligibility decision with the next eligible instant
[POS]:    Domain layer - 24h cooldown window
[UPDATE]: When the cooldown rule changes
*/

use chrono::{DateTime, Utc};

/// Length of the cooldown window after an activation
pub const COOLDOWN_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    CoolingDown { next_eligible: DateTime<Utc> },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// `last_mining_time + 24h`, in unix seconds
pub fn next_eligible_timestamp(last_mining_time: i64) -> i64 {
    last_mining_time.saturating_add(COOLDOWN_SECS)
}

/// Activation is allowed only once `now` is strictly past the window end.
pub fn check(last_mining_time: i64, now: DateTime<Utc>) -> Eligibility {
    let next_eligible = DateTime::<Utc>::from_timestamp(next_eligible_timestamp(last_mining_time), 0)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    if now > next_eligible {
        Eligibility::Eligible
    } else {
        Eligibility::CoolingDown { next_eligible }
    }
}

use chrono::{Duration, NaiveDateTime};
use tracing::warn;

use crate::config::AlmanacConfig;

/// Upper bound for the next-occurrence search: one synodic month of hourly
/// steps, rounded up. Every anchor day spans a 24-hour rounding window, so
/// the bound is never reached for a valid configuration.
const MAX_SEARCH_HOURS: i64 = 709;

/// The eight named illumination buckets, plus a sentinel for rounded ages
/// outside the 0-29 day table.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
    Unknown,
}

impl MoonPhase {
    pub fn label(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "new moon 🌑",
            MoonPhase::WaxingCrescent => "waxing crescent 🌒",
            MoonPhase::FirstQuarter => "first quarter 🌓",
            MoonPhase::WaxingGibbous => "waxing gibbous 🌔",
            MoonPhase::FullMoon => "full moon 🌕",
            MoonPhase::WaningGibbous => "waning gibbous 🌖",
            MoonPhase::ThirdQuarter => "third quarter 🌗",
            MoonPhase::WaningCrescent => "waning crescent 🌘",
            MoonPhase::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The four primary phases, identified by their anchor day in the cycle.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum PrimaryPhase {
    New,
    FirstQuarter,
    Full,
    ThirdQuarter,
}

impl PrimaryPhase {
    pub const ALL: [PrimaryPhase; 4] = [
        PrimaryPhase::New,
        PrimaryPhase::FirstQuarter,
        PrimaryPhase::Full,
        PrimaryPhase::ThirdQuarter,
    ];

    /// Rounded moon age (in whole days) at which this phase occurs.
    pub fn anchor_day(&self) -> i64 {
        match self {
            PrimaryPhase::New => 0,
            PrimaryPhase::FirstQuarter => 7,
            PrimaryPhase::Full => 15,
            PrimaryPhase::ThirdQuarter => 22,
        }
    }

    pub fn phase(&self) -> MoonPhase {
        match self {
            PrimaryPhase::New => MoonPhase::NewMoon,
            PrimaryPhase::FirstQuarter => MoonPhase::FirstQuarter,
            PrimaryPhase::Full => MoonPhase::FullMoon,
            PrimaryPhase::ThirdQuarter => MoonPhase::ThirdQuarter,
        }
    }

    pub fn label(&self) -> &'static str {
        self.phase().label()
    }
}

/// Days elapsed since the most recent new moon, in [0, lunar cycle).
///
/// The offset from the seed is truncated to whole hours before dividing by
/// 24, so results carry hour granularity only. `rem_euclid` wraps negative
/// offsets (timestamps before the seed) into the same [0, cycle) range.
pub fn moon_age(config: &AlmanacConfig, at: NaiveDateTime) -> f64 {
    let hours = (at - config.new_moon_seed).num_hours();
    let days = hours as f64 / 24.0;
    days.rem_euclid(config.lunar_cycle_days)
}

/// Maps a moon age onto its named phase bucket.
///
/// Age is rounded half-up to whole days. Rounded ages of 30 (the last ~44
/// minutes of the cycle, where age >= 29.5) fall outside the table and
/// report `Unknown`.
pub fn moon_phase(age: f64) -> MoonPhase {
    match age.round() as i64 {
        0 => MoonPhase::NewMoon,
        1..=6 => MoonPhase::WaxingCrescent,
        7 => MoonPhase::FirstQuarter,
        8..=14 => MoonPhase::WaxingGibbous,
        15 => MoonPhase::FullMoon,
        16..=21 => MoonPhase::WaningGibbous,
        22 => MoonPhase::ThirdQuarter,
        23..=29 => MoonPhase::WaningCrescent,
        _ => MoonPhase::Unknown,
    }
}

/// Fractional days from `from` until the next occurrence of `phase`.
///
/// Candidates advance in fixed 1-hour steps until the rounded moon age
/// matches the phase anchor, so the result is always a whole number of
/// hours expressed in days. Bounded at one full cycle of steps; `None` is
/// returned only if the bound is exhausted.
pub fn days_until_phase(
    config: &AlmanacConfig,
    from: NaiveDateTime,
    phase: PrimaryPhase,
) -> Option<f64> {
    let anchor = phase.anchor_day();
    for step in 0..=MAX_SEARCH_HOURS {
        let candidate = from + Duration::hours(step);
        if moon_age(config, candidate).round() as i64 == anchor {
            return Some(step as f64 / 24.0);
        }
    }
    warn!(
        "no {} found within {} hours of {}",
        phase.label(),
        MAX_SEARCH_HOURS,
        from
    );
    None
}

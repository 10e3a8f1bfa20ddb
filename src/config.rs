use chrono::NaiveDateTime;
use lazy_static::lazy_static;

/// Timestamp format accepted everywhere (input parsing and display).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-only format used for the upcoming-phase table.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

// Constants for the lunar cycles
pub const LUNAR_CYCLE_DAYS: f64 = 29.53058770576; // synodic month, days
pub const MOON_REVOLUTION_HOURS: f64 = 655.719864; // 27.321661 days * 24h, one zodiacal revolution

// Seed timestamps using lazy_static (NaiveDateTime is not const-constructible)
lazy_static! {
    // known new moon from https://www.almanac.com/astronomy/moon/calendar/zipcode/19382/2020-01
    static ref NEW_MOON_SEED: NaiveDateTime =
        NaiveDateTime::parse_from_str("2020-01-24 16:44:00", TIMESTAMP_FORMAT)
            .expect("new moon seed literal is valid");

    // moon enters Leo, from https://www.moontracks.com/lunar_ingress.html
    static ref MOON_SIGN_SEED: NaiveDateTime =
        NaiveDateTime::parse_from_str("2020-04-02 18:26:00", TIMESTAMP_FORMAT)
            .expect("moon sign seed literal is valid");
}

/// Immutable almanac configuration, built once at startup and passed by
/// reference into every calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlmanacConfig {
    /// Instant at which moon age is defined to be exactly 0.
    pub new_moon_seed: NaiveDateTime,
    /// Instant at which the moon sits at position 0 of its sign cycle (Leo).
    pub moon_sign_seed: NaiveDateTime,
    /// Synodic month length in days.
    pub lunar_cycle_days: f64,
    /// One full zodiacal revolution of the moon, in hours.
    pub moon_revolution_hours: f64,
}

impl AlmanacConfig {
    /// The standard configuration with the reference epochs above.
    pub fn standard() -> Self {
        Self {
            new_moon_seed: *NEW_MOON_SEED,
            moon_sign_seed: *MOON_SIGN_SEED,
            lunar_cycle_days: LUNAR_CYCLE_DAYS,
            moon_revolution_hours: MOON_REVOLUTION_HOURS,
        }
    }
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_seed_literals_parse() {
        let config = AlmanacConfig::standard();
        assert_eq!(config.new_moon_seed.year(), 2020);
        assert_eq!(config.new_moon_seed.month(), 1);
        assert_eq!(config.new_moon_seed.day(), 24);
        assert_eq!(config.new_moon_seed.hour(), 16);
        assert_eq!(config.new_moon_seed.minute(), 44);
        assert_eq!(config.moon_sign_seed.month(), 4);
        assert_eq!(config.moon_sign_seed.day(), 2);
    }

    #[test]
    fn test_cycle_constants() {
        let config = AlmanacConfig::default();
        assert_eq!(config.lunar_cycle_days, 29.53058770576);
        assert_eq!(config.moon_revolution_hours, 655.719864);
        // revolution split into 12 equal sign sectors of ~54.64 hours
        let sector = config.moon_revolution_hours / 12.0;
        assert!((sector - 54.643322).abs() < 1e-6);
    }
}

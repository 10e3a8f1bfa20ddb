use chrono::{Datelike, NaiveDateTime};

use crate::config::AlmanacConfig;

/// The twelve zodiac labels, shared by the sun-sign and moon-sign lookups.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn label(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries ♈",
            ZodiacSign::Taurus => "Taurus ♉",
            ZodiacSign::Gemini => "Gemini ♊",
            ZodiacSign::Cancer => "Cancer ♋",
            ZodiacSign::Leo => "Leo ♌",
            ZodiacSign::Virgo => "Virgo ♍",
            ZodiacSign::Libra => "Libra ♎",
            ZodiacSign::Scorpio => "Scorpio ♏",
            ZodiacSign::Sagittarius => "Sagittarius ♐",
            ZodiacSign::Capricorn => "Capricorn ♑",
            ZodiacSign::Aquarius => "Aquarius ♒",
            ZodiacSign::Pisces => "Pisces ♓",
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive (month, day) ranges for the sun sign, in fixed scan order.
/// Capricorn wraps across year-end and is split into two ranges.
const SUN_SIGN_RANGES: [((u32, u32), (u32, u32), ZodiacSign); 13] = [
    ((3, 21), (4, 19), ZodiacSign::Aries),
    ((4, 20), (5, 20), ZodiacSign::Taurus),
    ((5, 21), (6, 21), ZodiacSign::Gemini),
    ((6, 22), (7, 22), ZodiacSign::Cancer),
    ((7, 23), (8, 22), ZodiacSign::Leo),
    ((8, 23), (9, 22), ZodiacSign::Virgo),
    ((9, 23), (10, 23), ZodiacSign::Libra),
    ((10, 24), (11, 22), ZodiacSign::Scorpio),
    ((11, 23), (12, 21), ZodiacSign::Sagittarius),
    ((12, 22), (12, 31), ZodiacSign::Capricorn),
    ((1, 1), (1, 19), ZodiacSign::Capricorn),
    ((1, 20), (2, 18), ZodiacSign::Aquarius),
    ((2, 19), (3, 20), ZodiacSign::Pisces),
];

/// Rotational order of the moon sign wheel, starting at Leo per the seed
/// epoch: one sign per twelfth of the revolution.
const MOON_SIGN_WHEEL: [ZodiacSign; 12] = [
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
];

/// Sun sign for the calendar month-day of `at`, year-independent.
///
/// The (month, day) key is compared numerically against every range in
/// order, later matches overwriting earlier ones. The ranges are disjoint
/// and cover the whole year, so `None` is a defensive sentinel only.
pub fn sun_sign(at: NaiveDateTime) -> Option<ZodiacSign> {
    let key = (at.month(), at.day());
    let mut sign = None;
    for (low, high, candidate) in SUN_SIGN_RANGES {
        if key >= low && key <= high {
            sign = Some(candidate);
        }
    }
    sign
}

/// Moon sign for `at`, from the wrapped hour offset since the seed.
///
/// The revolution is divided into 12 half-open sectors of ~54.64 hours
/// each; the position's sector indexes the wheel directly.
pub fn moon_sign(config: &AlmanacConfig, at: NaiveDateTime) -> ZodiacSign {
    let hours = (at - config.moon_sign_seed).num_hours() as f64;
    let position = hours.rem_euclid(config.moon_revolution_hours);
    let sector_width = config.moon_revolution_hours / 12.0;
    let sector = (position / sector_width).floor() as usize;
    // position < revolution keeps the index below 12; clamp the float edge
    MOON_SIGN_WHEEL[sector.min(11)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TIMESTAMP_FORMAT;
    use chrono::Duration;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_sun_sign_vectors() {
        assert_eq!(sun_sign(ts("2021-03-21 00:00:00")), Some(ZodiacSign::Aries));
        assert_eq!(
            sun_sign(ts("2021-12-25 00:00:00")),
            Some(ZodiacSign::Capricorn)
        );
        assert_eq!(
            sun_sign(ts("2021-03-21 00:00:00")).map(|s| s.label()),
            Some("Aries ♈")
        );
    }

    #[test]
    fn test_sun_sign_ignores_year() {
        assert_eq!(sun_sign(ts("1999-07-01 12:00:00")), Some(ZodiacSign::Cancer));
        assert_eq!(sun_sign(ts("2021-07-01 12:00:00")), Some(ZodiacSign::Cancer));
    }

    #[test]
    fn test_sun_sign_boundaries() {
        assert_eq!(sun_sign(ts("2021-04-19 23:59:59")), Some(ZodiacSign::Aries));
        assert_eq!(sun_sign(ts("2021-04-20 00:00:00")), Some(ZodiacSign::Taurus));
        // Capricorn wraps across year-end
        assert_eq!(
            sun_sign(ts("2021-12-31 23:59:59")),
            Some(ZodiacSign::Capricorn)
        );
        assert_eq!(
            sun_sign(ts("2022-01-01 00:00:00")),
            Some(ZodiacSign::Capricorn)
        );
        assert_eq!(
            sun_sign(ts("2022-01-19 12:00:00")),
            Some(ZodiacSign::Capricorn)
        );
        assert_eq!(
            sun_sign(ts("2022-01-20 00:00:00")),
            Some(ZodiacSign::Aquarius)
        );
    }

    #[test]
    fn test_sun_sign_leap_day() {
        assert_eq!(sun_sign(ts("2020-02-29 10:00:00")), Some(ZodiacSign::Pisces));
    }

    #[test]
    fn test_moon_sign_at_seed() {
        let config = AlmanacConfig::standard();
        let sign = moon_sign(&config, ts("2020-04-02 18:26:00"));
        assert_eq!(sign, ZodiacSign::Leo);
        assert_eq!(sign.label(), "Leo ♌");
    }

    #[test]
    fn test_moon_sign_sector_advance() {
        let config = AlmanacConfig::standard();
        let seed = config.moon_sign_seed;
        // still inside the first ~54.64-hour sector
        assert_eq!(moon_sign(&config, seed + Duration::hours(54)), ZodiacSign::Leo);
        // one sector over
        assert_eq!(moon_sign(&config, seed + Duration::hours(55)), ZodiacSign::Virgo);
        // last sector before the revolution completes
        assert_eq!(
            moon_sign(&config, seed + Duration::hours(655)),
            ZodiacSign::Cancer
        );
        // wrapped back around to Leo
        assert_eq!(moon_sign(&config, seed + Duration::hours(656)), ZodiacSign::Leo);
    }

    #[test]
    fn test_moon_sign_wraps_before_seed() {
        let config = AlmanacConfig::standard();
        let before = config.moon_sign_seed - Duration::hours(1);
        assert_eq!(moon_sign(&config, before), ZodiacSign::Cancer);
    }
}

//! Day and year arithmetic for the 2026-2040 horizon.
//!
//! Years are fixed 365-day blocks counted from 2026-01-01. The horizon itself
//! is the real calendar span (5,479 days, leap days included), so the last
//! four days fall past the fifteenth 365-day block and are reported as 2040.

/// First simulated year (t = 0).
pub const START_YEAR: u32 = 2026;

/// Last simulated year.
pub const END_YEAR: u32 = 2040;

/// Year in which the burn event fires.
pub const BURN_YEAR: u32 = 2035;

/// Length of a simulation year in days.
pub const DAYS_PER_YEAR: u64 = 365;

/// Number of days from 2026-01-01 through 2040-12-31.
pub const HORIZON_DAYS: u64 = 5479;

/// Returns the year a 0-based day count falls in.
pub fn year_of_day(day: u64) -> u32 {
    let year = START_YEAR as u64 + day / DAYS_PER_YEAR;
    year.min(END_YEAR as u64) as u32
}

/// Returns the day index of January 1st of `year`.
///
/// Years before 2026 map to day 0.
pub fn first_day_of_year(year: u32) -> u64 {
    year.saturating_sub(START_YEAR) as u64 * DAYS_PER_YEAR
}

/// Fractional years elapsed since 2026-01-01 at the start of `day`.
pub fn elapsed_years(day: u64) -> f64 {
    day as f64 / DAYS_PER_YEAR as f64
}

/// Returns true if `day` is within the horizon (may still be simulated).
pub fn within_horizon(day: u64) -> bool {
    day < HORIZON_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_of_day_boundaries() {
        assert_eq!(year_of_day(0), 2026);
        assert_eq!(year_of_day(364), 2026);
        assert_eq!(year_of_day(365), 2027);
        assert_eq!(year_of_day(3284), 2034);
        assert_eq!(year_of_day(3285), 2035);
        assert_eq!(year_of_day(5474), 2040);
    }

    #[test]
    fn test_year_clamped_for_leap_days() {
        assert_eq!(year_of_day(5475), 2040);
        assert_eq!(year_of_day(HORIZON_DAYS), 2040);
    }

    #[test]
    fn test_first_day_of_year() {
        assert_eq!(first_day_of_year(2026), 0);
        assert_eq!(first_day_of_year(BURN_YEAR), 3285);
        assert_eq!(first_day_of_year(2000), 0);
    }

    #[test]
    fn test_elapsed_years() {
        assert_eq!(elapsed_years(0), 0.0);
        assert!((elapsed_years(730) - 2.0).abs() < 1e-12);
        assert!(within_horizon(HORIZON_DAYS - 1));
        assert!(!within_horizon(HORIZON_DAYS));
    }
}

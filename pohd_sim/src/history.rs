//! Append-only daily history of aggregated metrics.

use pohd_core::calendar::first_day_of_year;
use pohd_core::{Aggregates, SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Three index-aligned series with one entry per executed day.
///
/// Entries are only ever appended through [`History::record`], which pushes
/// to all three series at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    hcs: Vec<f64>,
    cw: Vec<f64>,
    gdp: Vec<f64>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one day of aggregates.
    pub fn record(&mut self, aggregates: &Aggregates) {
        self.hcs.push(aggregates.average_hcs);
        self.cw.push(aggregates.total_cw);
        self.gdp.push(aggregates.gdp_index);
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.gdp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gdp.is_empty()
    }

    /// Average HCS per day.
    pub fn hcs(&self) -> &[f64] {
        &self.hcs
    }

    /// Total Community Wealth per day.
    pub fn cw(&self) -> &[f64] {
        &self.cw
    }

    /// GDP index per day.
    pub fn gdp(&self) -> &[f64] {
        &self.gdp
    }

    /// GDP index recorded for the given day.
    pub fn gdp_at_day(&self, day: usize) -> SimResult<f64> {
        self.gdp.get(day).copied().ok_or(SimError::MissingHistory(day))
    }

    /// GDP index recorded on January 1st of `year`.
    pub fn gdp_at_year_start(&self, year: u32) -> SimResult<f64> {
        self.gdp_at_day(first_day_of_year(year) as usize)
    }

    /// GDP index of the most recent day.
    pub fn last_gdp(&self) -> SimResult<f64> {
        self.gdp.last().copied().ok_or(SimError::EmptyHistory)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.hcs.clear();
        self.cw.clear();
        self.gdp.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(gdp: f64) -> Aggregates {
        Aggregates {
            average_hcs: 0.5,
            total_cw: gdp * 10.0,
            gdp_index: gdp,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_keeps_series_aligned() {
        let mut history = History::new();
        for i in 0..5 {
            history.record(&day(i as f64));
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.hcs().len(), 5);
        assert_eq!(history.cw().len(), 5);
        assert_eq!(history.gdp(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(history.cw()[3], 30.0);
    }

    #[test]
    fn test_lookups() {
        let mut history = History::new();
        for i in 0..400 {
            history.record(&day(i as f64));
        }

        assert_eq!(history.gdp_at_day(10).unwrap(), 10.0);
        assert_eq!(history.gdp_at_year_start(2027).unwrap(), 365.0);
        assert_eq!(history.last_gdp().unwrap(), 399.0);
        assert!(matches!(
            history.gdp_at_year_start(2035),
            Err(SimError::MissingHistory(3285))
        ));
    }

    #[test]
    fn test_reads_do_not_consume() {
        let mut history = History::new();
        history.record(&day(1.0));

        assert_eq!(history.gdp(), history.gdp());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(&day(1.0));
        history.clear();

        assert!(history.is_empty());
        assert!(history.hcs().is_empty());
        assert!(matches!(history.last_gdp(), Err(SimError::EmptyHistory)));
    }
}

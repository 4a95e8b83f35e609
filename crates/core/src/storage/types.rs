use chrono::NaiveDate;

use super::DateRangeError;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// A range covering every representable date.
    pub fn all_time() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    /// Builds a range from optional bounds. A missing bound is open.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, DateRangeError> {
        Self::new(
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
        )
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::all_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let range = DateRange::new(date(2024, 6, 15), date(2024, 6, 15)).unwrap();
        assert!(range.contains(date(2024, 6, 15)));
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));
        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

        assert!(range.contains(date(2024, 3, 1)));
        assert!(range.contains(date(2024, 3, 31)));
        assert!(!range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_from_bounds_open_ends() {
        let range = DateRange::from_bounds(Some(date(2024, 5, 1)), None).unwrap();

        assert!(range.contains(date(2099, 1, 1)));
        assert!(!range.contains(date(2024, 4, 30)));
        assert_eq!(DateRange::from_bounds(None, None).unwrap(), DateRange::all_time());
    }

    #[test]
    fn test_from_bounds_rejects_inverted() {
        let result = DateRange::from_bounds(Some(date(2024, 5, 2)), Some(date(2024, 5, 1)));
        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }
}

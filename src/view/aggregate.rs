//! Date bucketing for dashboard charts.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Anything with a calendar date that can be counted into buckets.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketUnit {
    #[default]
    Day,
    /// Seven-day steps counted from the window start.
    Week,
    /// Calendar months; the first bucket starts on the 1st of the start month.
    Month,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDate,
    pub count: usize,
}

/// Counts `entities` into consecutive buckets covering
/// `window_start..=window_end`.
///
/// Every bucket of the window is present even when nothing falls into it,
/// so an empty input yields all-zero buckets. Entities outside the window
/// are ignored. A window whose start is after its end has no buckets.
pub fn bucketize<T: Dated>(
    entities: &[T],
    unit: BucketUnit,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<Bucket> {
    if window_start > window_end {
        return Vec::new();
    }

    let mut buckets = Vec::new();
    let mut start = align(window_start, unit);
    while start <= window_end {
        let Some(next) = advance(start, unit) else {
            break;
        };
        buckets.push(Bucket {
            label: label(start, unit),
            start,
            count: 0,
        });
        start = next;
    }

    for entity in entities {
        let date = entity.date();
        if date < window_start || date > window_end {
            continue;
        }
        // Buckets are sorted by start, so the owner is the last one starting
        // on or before the date.
        let index = buckets.partition_point(|bucket| bucket.start <= date);
        if let Some(bucket) = index.checked_sub(1).and_then(|i| buckets.get_mut(i)) {
            bucket.count += 1;
        }
    }

    buckets
}

fn align(date: NaiveDate, unit: BucketUnit) -> NaiveDate {
    match unit {
        BucketUnit::Day | BucketUnit::Week => date,
        BucketUnit::Month => date.with_day(1).unwrap_or(date),
    }
}

fn advance(date: NaiveDate, unit: BucketUnit) -> Option<NaiveDate> {
    match unit {
        BucketUnit::Day => date.checked_add_signed(Duration::days(1)),
        BucketUnit::Week => date.checked_add_signed(Duration::days(7)),
        BucketUnit::Month => date.checked_add_months(Months::new(1)),
    }
}

fn label(start: NaiveDate, unit: BucketUnit) -> String {
    match unit {
        BucketUnit::Day | BucketUnit::Week => start.format("%d %b").to_string(),
        BucketUnit::Month => start.format("%b %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stamp(NaiveDate);

    impl Dated for Stamp {
        fn date(&self) -> NaiveDate {
            self.0
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_input_gives_zero_buckets() {
        let buckets = bucketize::<Stamp>(&[], BucketUnit::Day, day(2020, 1, 1), day(2020, 1, 7));
        assert_eq!(buckets.len(), 7);
        assert!(buckets.iter().all(|b| b.count == 0));
        assert_eq!(buckets[0].label, "01 Jan");
    }

    #[test]
    fn test_inverted_window_has_no_buckets() {
        let buckets = bucketize::<Stamp>(&[], BucketUnit::Day, day(2020, 2, 1), day(2020, 1, 1));
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_counts_by_week_and_month() {
        let stamps = vec![
            Stamp(day(2020, 1, 1)),
            Stamp(day(2020, 1, 7)),
            Stamp(day(2020, 1, 8)),
            Stamp(day(2020, 2, 15)),
            Stamp(day(2021, 1, 1)),
        ];

        let weeks = bucketize(&stamps, BucketUnit::Week, day(2020, 1, 1), day(2020, 1, 14));
        assert_eq!(weeks.iter().map(|b| b.count).collect::<Vec<_>>(), vec![2, 1]);

        let months = bucketize(&stamps, BucketUnit::Month, day(2020, 1, 10), day(2020, 3, 31));
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].start, day(2020, 1, 1));
        assert_eq!(months[0].label, "Jan 2020");
        // All January stamps fall before the window start.
        assert_eq!(months.iter().map(|b| b.count).collect::<Vec<_>>(), vec![0, 1, 0]);
    }
}

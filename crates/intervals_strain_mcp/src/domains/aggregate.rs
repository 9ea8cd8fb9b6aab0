//! Daily bucketing of strain records into a gap-free series.

use chrono::{Days, NaiveDate};

use super::strain::{StrainLoad, StrainRecord};
use crate::error::StrainError;

/// Width of the zero-filled series used when there is no activity at all.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// One [`StrainLoad`] per consecutive calendar day, starting at `start`.
///
/// Never empty: construction always covers at least one day.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyStrainSeries {
    start: NaiveDate,
    days: Vec<StrainLoad>,
}

impl DailyStrainSeries {
    /// All-zero series over `[start, end]`; `end` before `start` gives the
    /// single day `start`.
    pub fn zeros(start: NaiveDate, end: NaiveDate) -> Self {
        let len = (end - start).num_days().max(0) as usize + 1;
        Self {
            start,
            days: vec![StrainLoad::default(); len],
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Days::new(self.days.len() as u64 - 1)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start).num_days();
        usize::try_from(offset).ok().filter(|i| *i < self.days.len())
    }

    pub fn get(&self, date: NaiveDate) -> Option<&StrainLoad> {
        self.index_of(date).map(|i| &self.days[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &StrainLoad)> {
        let start = self.start;
        self.days
            .iter()
            .enumerate()
            .map(move |(i, load)| (start + Days::new(i as u64), load))
    }

    /// Adds `load` to `date`; dates outside the series are ignored.
    fn add(&mut self, date: NaiveDate, load: StrainLoad) -> bool {
        match self.index_of(date) {
            Some(i) => {
                self.days[i] += load;
                true
            }
            None => false,
        }
    }
}

/// [`aggregate_with_lookback`] with the default 90-day fallback window.
pub fn aggregate(
    records: &[StrainRecord],
    as_of: NaiveDate,
) -> Result<DailyStrainSeries, StrainError> {
    aggregate_with_lookback(records, as_of, DEFAULT_LOOKBACK_DAYS)
}

/// Sum records per calendar day over `[earliest record, as_of]`, zero-filling
/// rest days.
///
/// With no records the series is `[as_of - lookback_days, as_of]`. Records
/// dated after `as_of` fall outside the series; if that is every record the
/// call is refused, since a backwards range has no meaning.
pub fn aggregate_with_lookback(
    records: &[StrainRecord],
    as_of: NaiveDate,
    lookback_days: u32,
) -> Result<DailyStrainSeries, StrainError> {
    let start = match records.iter().map(|r| r.date).min() {
        Some(earliest) if earliest > as_of => {
            return Err(StrainError::AsOfBeforeFirstActivity { as_of, earliest });
        }
        Some(earliest) => earliest,
        None => as_of
            .checked_sub_days(Days::new(lookback_days.into()))
            .unwrap_or(NaiveDate::MIN),
    };

    let mut series = DailyStrainSeries::zeros(start, as_of);
    let mut outside = 0usize;
    for record in records {
        if !series.add(record.date, record.load) {
            outside += 1;
        }
    }
    if outside > 0 {
        tracing::debug!(outside, %as_of, "ignored records dated after the reference date");
    }
    Ok(series)
}

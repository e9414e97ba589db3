//! Date/time component sources with mutually constrained bounds.
//!
//! Each component column (year, month, day, ...) is a [`BoundedNumberSource`]
//! whose range is its natural domain, clamped further by the configured
//! min/max date *only when every coarser component already equals that
//! bound's prefix*: with `max = 2020-06-10`, the day column is capped at 10
//! only while year 2020 and month June are selected.
//!
//! Months are zero-based (0–11), matching the host platform convention the
//! widget mirrors; they render one-based.

use crate::{BoundedNumberSource, DataSource, FactoryError, SourceFactory};

/// A calendar timestamp with zero-based months. Component order gives the
/// derived lexicographic ordering used for range checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl DateTime {
    pub const fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight on the given day.
    pub const fn ymd(year: i64, month: i64, day: i64) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    fn component(&self, field: DateField) -> i64 {
        match field {
            DateField::Year => self.year,
            DateField::Month => self.month,
            DateField::Day => self.day,
            DateField::Hour => self.hour,
            DateField::Minute => self.minute,
            DateField::Second => self.second,
        }
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year,
            self.month + 1,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// One picker column of a date/time factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Pluggable display suffixes per component, e.g. localized "年"/"月"/"日".
#[derive(Clone, Default)]
pub struct DateUnits {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub second: Option<String>,
}

impl DateUnits {
    fn for_field(&self, field: DateField) -> Option<String> {
        match field {
            DateField::Year => self.year.clone(),
            DateField::Month => self.month.clone(),
            DateField::Day => self.day.clone(),
            DateField::Hour => self.hour.clone(),
            DateField::Minute => self.minute.clone(),
            DateField::Second => self.second.clone(),
        }
    }
}

/// Cascadable factory producing one bounded numeric source per component.
pub struct DateTimeFactory {
    min: DateTime,
    max: DateTime,
    init: DateTime,
    fields: Vec<DateField>,
    units: DateUnits,
}

impl DateTimeFactory {
    /// Six columns, year through second. Fails fast when `max < min`.
    pub fn new(min: DateTime, max: DateTime, init: DateTime) -> Result<Self, FactoryError> {
        Self::with_fields(
            min,
            max,
            init,
            vec![
                DateField::Year,
                DateField::Month,
                DateField::Day,
                DateField::Hour,
                DateField::Minute,
                DateField::Second,
            ],
        )
    }

    /// Three columns, year/month/day.
    pub fn date(min: DateTime, max: DateTime, init: DateTime) -> Result<Self, FactoryError> {
        Self::with_fields(
            min,
            max,
            init,
            vec![DateField::Year, DateField::Month, DateField::Day],
        )
    }

    /// Three columns, hour/minute/second.
    pub fn time(min: DateTime, max: DateTime, init: DateTime) -> Result<Self, FactoryError> {
        Self::with_fields(
            min,
            max,
            init,
            vec![DateField::Hour, DateField::Minute, DateField::Second],
        )
    }

    fn with_fields(
        min: DateTime,
        max: DateTime,
        init: DateTime,
        fields: Vec<DateField>,
    ) -> Result<Self, FactoryError> {
        if max < min {
            return Err(FactoryError::InvertedDateRange { min, max });
        }
        Ok(Self {
            min,
            max,
            init,
            fields,
            units: DateUnits::default(),
        })
    }

    pub fn units(mut self, units: DateUnits) -> Self {
        self.units = units;
        self
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn resolved_component(&self, resolved: &[i64], field: DateField) -> i64 {
        self.fields
            .iter()
            .position(|f| *f == field)
            .and_then(|i| resolved.get(i).copied())
            .unwrap_or_else(|| self.init.component(field))
    }

    /// Natural domain of a component, given the already-resolved coarser
    /// components (the day count needs the resolved year and month).
    fn natural_bounds(&self, field: DateField, resolved: &[i64]) -> (i64, i64) {
        match field {
            DateField::Year => (self.min.year, self.max.year),
            DateField::Month => (0, 11),
            DateField::Day => {
                let year = self.resolved_component(resolved, DateField::Year);
                let month = self.resolved_component(resolved, DateField::Month);
                (1, days_in_month(year, month))
            }
            DateField::Hour => (0, 23),
            DateField::Minute => (0, 59),
            DateField::Second => (0, 59),
        }
    }

    /// Natural bounds, clamped by whichever configured bound the resolved
    /// prefix exactly matches.
    fn bounds_for(&self, index: usize, resolved: &[i64]) -> (i64, i64) {
        let field = self.fields[index];
        let (mut lo, mut hi) = self.natural_bounds(field, resolved);

        let matches_bound = |bound: &DateTime| {
            self.fields[..index]
                .iter()
                .zip(resolved)
                .all(|(f, value)| *value == bound.component(*f))
        };
        if matches_bound(&self.min) {
            lo = lo.max(self.min.component(field));
        }
        if matches_bound(&self.max) {
            hi = hi.min(self.max.component(field));
        }
        (lo, hi)
    }

    fn source_for(&self, field: DateField, lo: i64, hi: i64, seed: i64) -> BoundedNumberSource {
        let source = BoundedNumberSource::new(lo, hi, seed)
            .unwrap_or_else(|_| unreachable!("component bounds are ordered"));
        let source = match field {
            DateField::Year => source,
            DateField::Month => source.pad(2).display_offset(1),
            _ => source.pad(2),
        };
        match self.units.for_field(field) {
            Some(unit) => source.unit(unit),
            None => source,
        }
    }

    /// Resolves every column left to right, emitting sources from `emit_from`
    /// on. Columns before `emit_from` contribute their committed value to the
    /// prefix untouched; later columns are re-bounded and their seed clamped,
    /// with the clamped value feeding the next column's prefix.
    fn build(&self, seeds: &[Option<i64>], emit_from: usize) -> Vec<Box<dyn DataSource<i64>>> {
        let mut resolved: Vec<i64> = Vec::with_capacity(self.fields.len());
        let mut sources: Vec<Box<dyn DataSource<i64>>> = Vec::new();

        for (index, field) in self.fields.iter().copied().enumerate() {
            let seed = seeds
                .get(index)
                .copied()
                .flatten()
                .unwrap_or_else(|| self.init.component(field));

            if index < emit_from {
                resolved.push(seed);
                continue;
            }

            let (lo, hi) = self.bounds_for(index, &resolved);
            let seed = seed.clamp(lo, hi);
            sources.push(Box::new(self.source_for(field, lo, hi, seed)));
            resolved.push(seed);
        }
        sources
    }
}

impl SourceFactory<i64> for DateTimeFactory {
    fn cascadable(&self) -> bool {
        true
    }

    fn create(&self) -> Vec<Box<dyn DataSource<i64>>> {
        self.build(&[], 0)
    }

    fn change(
        &self,
        values: &[Option<i64>],
        from: Option<usize>,
    ) -> Vec<Box<dyn DataSource<i64>>> {
        self.build(values, from.map_or(0, |i| i + 1))
    }
}

/// Day count for a zero-based month.
pub fn days_in_month(year: i64, month: i64) -> i64 {
    const DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let month = month.clamp(0, 11) as usize;
    if month == 1 && is_leap_year(year) {
        29
    } else {
        DAYS[month]
    }
}

pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[cfg(test)]
#[path = "tests/datetime_tests.rs"]
mod tests;

//! Bounded numeric source.

use crate::{DataSource, FactoryError};

/// A source over the integers `min..=max`, optionally looping, with a
/// pluggable display suffix (a unit label such as a localized "year").
///
/// This is the building block of every date/time component column; the
/// factory recreates these with freshly clamped bounds on each cascade step.
pub struct BoundedNumberSource {
    min: i64,
    max: i64,
    init: i64,
    looping: bool,
    unit: Option<String>,
    pad: usize,
    display_offset: i64,
}

impl BoundedNumberSource {
    /// Fails fast on inverted bounds. `init` is clamped into range.
    pub fn new(min: i64, max: i64, init: i64) -> Result<Self, FactoryError> {
        if min > max {
            return Err(FactoryError::InvertedBounds { min, max });
        }
        Ok(Self {
            min,
            max,
            init: init.clamp(min, max),
            looping: false,
            unit: None,
            pad: 0,
            display_offset: 0,
        })
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Suffix appended to every rendered value.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Zero-pads rendered values to `width` digits.
    pub fn pad(mut self, width: usize) -> Self {
        self.pad = width;
        self
    }

    /// Added to the value for display only. Lets a zero-based month render
    /// one-based.
    pub fn display_offset(mut self, offset: i64) -> Self {
        self.display_offset = offset;
        self
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl DataSource<i64> for BoundedNumberSource {
    fn init(&self) -> Option<i64> {
        Some(self.init)
    }

    fn prev(&self, current: &Option<i64>) -> Option<i64> {
        let value = (*current)?;
        if value > self.min {
            Some(value - 1)
        } else if self.looping {
            Some(self.max)
        } else {
            None
        }
    }

    fn next(&self, current: &Option<i64>) -> Option<i64> {
        let value = (*current)?;
        if value < self.max {
            Some(value + 1)
        } else if self.looping {
            Some(self.min)
        } else {
            None
        }
    }

    fn text(&self, current: &Option<i64>) -> String {
        let Some(value) = current else {
            return String::new();
        };
        let shown = value + self.display_offset;
        let digits = format!("{:0width$}", shown, width = self.pad);
        match &self.unit {
            Some(unit) => format!("{digits}{unit}"),
            None => digits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_clamps_into_range() {
        let source = BoundedNumberSource::new(10, 20, 99).unwrap();
        assert_eq!(source.init(), Some(20));
        assert_eq!(source.min(), 10);
        assert_eq!(source.max(), 20);
    }

    #[test]
    fn bounded_edges_return_none() {
        let source = BoundedNumberSource::new(0, 3, 0).unwrap();
        assert_eq!(source.prev(&Some(0)), None);
        assert_eq!(source.next(&Some(3)), None);
        assert_eq!(source.prev(&None), None);
    }

    #[test]
    fn looping_wraps_both_ways() {
        let source = BoundedNumberSource::new(0, 59, 0).unwrap().looping(true);
        assert_eq!(source.prev(&Some(0)), Some(59));
        assert_eq!(source.next(&Some(59)), Some(0));
    }

    #[test]
    fn round_trip_inside_range() {
        let source = BoundedNumberSource::new(1, 31, 15).unwrap();
        for value in 2..=31 {
            let prev = source.prev(&Some(value));
            assert_eq!(source.next(&prev), Some(value));
        }
    }

    #[test]
    fn inverted_bounds_fail_fast() {
        assert!(matches!(
            BoundedNumberSource::new(5, 4, 5),
            Err(FactoryError::InvertedBounds { min: 5, max: 4 })
        ));
    }

    #[test]
    fn text_applies_pad_offset_and_unit() {
        let month = BoundedNumberSource::new(0, 11, 7)
            .unwrap()
            .pad(2)
            .display_offset(1)
            .unit("月");
        assert_eq!(month.text(&Some(7)), "08月");
        assert_eq!(month.text(&None), "");
    }
}

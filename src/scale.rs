//! Scale functions for data-to-visual mappings.
//!
//! - [`LinearScale`] for numeric scatter fields and the legend axis
//! - [`TimeScale`] for the `Date` field (epoch seconds underneath)
//! - [`BandScale`] for heatmap dimensions, contiguous bands with zero padding
//! - [`ColorScale`] for the sequential heatmap fill
//!
//! Scales never fail to build from a non-empty extent: a degenerate domain (min == max) is
//! widened to a small synthetic span so mapping and inversion never divide by zero.

use chrono::{DateTime, Datelike, Months, NaiveDate};

use crate::color::{interpolate_stops, Rgba, YL_GN_BU};
use crate::geometry::span_overlaps;
use crate::record::{date_to_timestamp, DimensionValue, Field, Record};

/// Half-width of the synthetic span used for a degenerate numeric domain.
const NUMERIC_PAD: f64 = 0.5;

/// Half-width of the synthetic span used for a degenerate date domain (12 hours).
const TIME_PAD_SECS: f64 = 12.0 * 3600.0;

/// Default tick count requested from continuous scales.
pub const DEFAULT_TICKS: usize = 10;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// A labelled tick position along an axis, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub position: f32,
    /// Formatted label.
    pub label: String,
}

/// Min/max of finite values, `None` when there are none.
#[must_use]
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale; a degenerate domain is widened by ±0.5.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (lo, hi) = widen(domain, NUMERIC_PAD);
        Self {
            domain_min: lo,
            domain_max: hi,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Create a scale over the extent of `data`.
    #[must_use]
    pub fn from_data(data: &[f64], range: (f32, f32)) -> Option<Self> {
        extent(data.iter().copied())
            .map(|domain| Self::new(domain, range))
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        let span = f64::from(self.range_max - self.range_min);
        if span == 0.0 {
            return self.domain_min;
        }
        let t = f64::from(value - self.range_min) / span;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// "Nice" tick values covering the domain, roughly `count` of them.
    #[must_use]
    pub fn tick_values(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.domain_min, self.domain_max);
        let step = tick_step(lo, hi, count);
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }
        if step < 1.0 {
            // Integer inverse keeps 0.1-style steps exact at the domain ends
            let inverse = (1.0 / step).round();
            let first = (lo * inverse).ceil() as i64;
            let last = (hi * inverse).floor() as i64;
            return (first..=last).map(|i| i as f64 / inverse).collect();
        }
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Labelled ticks in pixel space.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let step = tick_step(self.domain_min, self.domain_max, count);
        self.tick_values(count)
            .into_iter()
            .map(|v| Tick {
                position: self.scale(v),
                label: format_number(v, step),
            })
            .collect()
    }
}

impl Scale<f64, f32> for LinearScale {
    fn scale(&self, value: f64) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + (t as f32) * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Time scale over calendar dates, stored as epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Create a time scale over `[start, end]` dates; a single date is widened by ±12 hours.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate, range: (f32, f32)) -> Self {
        Self::from_timestamps((date_to_timestamp(start), date_to_timestamp(end)), range)
    }

    /// Create a time scale over an epoch-seconds domain.
    #[must_use]
    pub fn from_timestamps(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (lo, hi) = widen(domain, TIME_PAD_SECS);
        Self {
            inner: LinearScale {
                domain_min: lo,
                domain_max: hi,
                range_min: range.0,
                range_max: range.1,
            },
        }
    }

    /// Invert a pixel offset to epoch seconds.
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        self.inner.invert(value)
    }

    /// Month-boundary ticks labelled `Jan 2018`, falling back to day ticks for short spans.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let (lo, hi) = self.inner.domain();
        let (Some(start), Some(end)) = (timestamp_to_date(lo), timestamp_to_date(hi)) else {
            return Vec::new();
        };
        let count = count.max(1);

        let months = month_boundaries(start, end, lo, hi);
        if months.len() >= 2 {
            let stride = [1, 2, 3, 6, 12]
                .into_iter()
                .find(|s| months.len().div_ceil(*s) <= count)
                .unwrap_or(12);
            return months
                .into_iter()
                .filter(|d| (d.month0() as usize) % stride == 0 || stride == 1)
                .map(|d| Tick {
                    position: self.inner.scale(date_to_timestamp(d)),
                    label: d.format("%b %Y").to_string(),
                })
                .collect();
        }

        let days = (end - start).num_days().max(0) as usize + 1;
        let stride = days.div_ceil(count).max(1);
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .step_by(stride)
            .map(|d| (d, date_to_timestamp(d)))
            .filter(|(_, ts)| *ts >= lo && *ts <= hi)
            .map(|(d, ts)| Tick {
                position: self.inner.scale(ts),
                label: d.format("%d %b").to_string(),
            })
            .collect()
    }
}

impl Scale<f64, f32> for TimeScale {
    fn scale(&self, value: f64) -> f32 {
        self.inner.scale(value)
    }

    fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    fn range(&self) -> (f32, f32) {
        self.inner.range()
    }
}

/// Continuous axis scale for one scatter field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    /// Numeric field.
    Linear(LinearScale),
    /// Date field.
    Time(TimeScale),
}

impl AxisScale {
    /// Build the scale for `field` over the records that carry a value for it.
    ///
    /// `None` when no record has a usable value (empty data, all dates malformed).
    #[must_use]
    pub fn for_field(records: &[Record], field: Field, range: (f32, f32)) -> Option<Self> {
        let domain = extent(records.iter().filter_map(|r| field.value_of(r)))?;
        Some(if field.is_temporal() {
            Self::Time(TimeScale::from_timestamps(domain, range))
        } else {
            Self::Linear(LinearScale::new(domain, range))
        })
    }

    /// Invert a pixel offset to a field value.
    #[must_use]
    pub fn invert(&self, value: f32) -> f64 {
        match self {
            Self::Linear(s) => s.invert(value),
            Self::Time(s) => s.invert(value),
        }
    }

    /// Labelled ticks for the axis.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }
}

impl Scale<f64, f32> for AxisScale {
    fn scale(&self, value: f64) -> f32 {
        match self {
            Self::Linear(s) => s.scale(value),
            Self::Time(s) => s.scale(value),
        }
    }

    fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    fn range(&self) -> (f32, f32) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }
}

/// Ordinal band scale: one equal, contiguous band per domain value.
///
/// A reversed range (`range.0 > range.1`, as for a y axis) puts the first value at the
/// bottom. [`BandScale::position`] always returns the band's lower pixel edge.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<DimensionValue>,
    range: (f32, f32),
}

impl BandScale {
    /// Create a band scale with zero padding.
    #[must_use]
    pub fn new(domain: Vec<DimensionValue>, range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// The ordered domain.
    #[must_use]
    pub fn domain(&self) -> &[DimensionValue] {
        &self.domain
    }

    /// Pixel range as given.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// Width of every band; zero for an empty domain.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0).abs() / self.domain.len() as f32
    }

    /// Lower pixel edge of the band at `index`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f32> {
        let n = self.domain.len();
        if index >= n {
            return None;
        }
        let slot = if self.range.0 <= self.range.1 {
            index
        } else {
            n - 1 - index
        };
        let start = self.range.0.min(self.range.1);
        Some(start + self.bandwidth() * slot as f32)
    }

    /// Lower pixel edge of the band for `value`, `None` outside the domain.
    #[must_use]
    pub fn position(&self, value: &DimensionValue) -> Option<f32> {
        self.index_of(value).and_then(|i| self.position_at(i))
    }

    /// Domain index of `value`.
    #[must_use]
    pub fn index_of(&self, value: &DimensionValue) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    /// Domain values whose band overlaps `[lo, hi]` by a non-zero amount, in domain order.
    #[must_use]
    pub fn values_in(&self, lo: f32, hi: f32) -> Vec<DimensionValue> {
        let bw = self.bandwidth();
        self.domain
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                self.position_at(*i)
                    .is_some_and(|p| span_overlaps(p, bw, lo, hi))
            })
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// One tick at the center of every band.
    #[must_use]
    pub fn ticks(&self, label: impl Fn(&DimensionValue) -> String) -> Vec<Tick> {
        let half = self.bandwidth() / 2.0;
        self.domain
            .iter()
            .enumerate()
            .filter_map(|(i, v)| {
                self.position_at(i).map(|p| Tick {
                    position: p + half,
                    label: label(v),
                })
            })
            .collect()
    }
}

/// Sequential color scale for mapping values to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Sequential YlGnBu scale over `[0, max_total]`, with an upper bound of at least 1.
    #[must_use]
    pub fn yl_gn_bu(max_total: f64) -> Self {
        Self::sequential(YL_GN_BU.to_vec(), max_total)
    }

    /// Sequential scale through `colors` over `[0, max(1, upper)]`.
    #[must_use]
    pub fn sequential(colors: Vec<Rgba>, upper: f64) -> Self {
        let upper = if upper.is_finite() {
            upper.max(1.0)
        } else {
            1.0
        };
        Self {
            colors,
            domain_min: 0.0,
            domain_max: upper as f32,
        }
    }

    /// Color stops, low to high (the legend gradient).
    #[must_use]
    pub fn stops(&self) -> &[Rgba] {
        &self.colors
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        interpolate_stops(&self.colors, t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (
            self.colors.first().copied().unwrap_or(Rgba::BLACK),
            self.colors.last().copied().unwrap_or(Rgba::WHITE),
        )
    }
}

fn widen(domain: (f64, f64), pad: f64) -> (f64, f64) {
    let (lo, hi) = if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    };
    if (hi - lo).abs() < f64::EPSILON * hi.abs().max(1.0) {
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}

fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let count = count.max(1) as f64;
    let raw = (hi - lo).abs() / count;
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = 10f64.powi(raw.log10().floor() as i32);
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

fn format_number(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    let text = format!("{value:.decimals$}");
    let text = if text.starts_with('-') && text.trim_start_matches(['-', '0', '.']).is_empty() {
        text.trim_start_matches('-').to_string()
    } else {
        text
    };
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = text.strip_prefix('-').map_or(("", text), |r| ("-", r));
    let (int, frac) = rest
        .split_once('.')
        .map_or((rest, None), |(i, f)| (i, Some(f)));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn timestamp_to_date(ts: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts.floor() as i64, 0)
        .map(|dt| dt.date_naive())
}

fn month_boundaries(start: NaiveDate, end: NaiveDate, lo: f64, hi: f64) -> Vec<NaiveDate> {
    let Some(mut cursor) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    while cursor <= end {
        let ts = date_to_timestamp(cursor);
        if ts >= lo && ts <= hi {
            out.push(cursor);
        }
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn n(v: u32) -> DimensionValue {
        DimensionValue::Number(v)
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0));
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
        assert_relative_eq!(scale.invert(0.5), 50.0);
    }

    #[test]
    fn test_linear_scale_reversed_range() {
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0));
        assert_relative_eq!(scale.scale(0.0), 200.0);
        assert_relative_eq!(scale.scale(10.0), 0.0);
        assert_relative_eq!(scale.invert(100.0), 5.0);
    }

    #[test]
    fn test_degenerate_domain_is_widened() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(scale.domain(), (4.5, 5.5));
        assert_relative_eq!(scale.scale(5.0), 50.0);
        assert!(scale.scale(5.0).is_finite());

        let time = TimeScale::from_timestamps((86_400.0, 86_400.0), (0.0, 10.0));
        assert_eq!(
            time.domain(),
            (86_400.0 - TIME_PAD_SECS, 86_400.0 + TIME_PAD_SECS)
        );
    }

    #[test]
    fn test_linear_scale_from_data() {
        assert!(LinearScale::from_data(&[], (0.0, 1.0)).is_none());
        assert!(LinearScale::from_data(&[f64::NAN], (0.0, 1.0)).is_none());
        let data = [3.0, -1.0, 7.0];
        let scale = LinearScale::from_data(&data, (0.0, 1.0)).unwrap();
        assert_eq!(scale.domain(), (-1.0, 7.0));
    }

    #[test]
    fn test_tick_values_are_nice() {
        let scale = LinearScale::new((0.0, 3556.0), (0.0, 500.0));
        let ticks = scale.tick_values(10);
        assert_eq!(ticks.first(), Some(&0.0));
        assert_relative_eq!(ticks[1], 500.0);
        assert_eq!(ticks.len(), 8);

        let labels: Vec<String> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(labels[2], "1,000");
    }

    #[test]
    fn test_tick_labels_fractional() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0));
        let labels: Vec<String> = scale.ticks(5).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
    }

    #[test]
    fn test_negative_ticks() {
        let scale = LinearScale::new((-17.8, 39.4), (0.0, 100.0));
        let labels: Vec<String> = scale.ticks(10).into_iter().map(|t| t.label).collect();
        assert_eq!(labels.first().map(String::as_str), Some("-15"));
        assert!(labels.contains(&"0".to_string()));
    }

    #[test]
    fn test_time_scale_month_ticks() {
        let start = NaiveDate::from_ymd_opt(2017, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2018, 11, 30).unwrap();
        let scale = TimeScale::new(start, end, (0.0, 1000.0));

        let ticks = scale.ticks(12);
        assert_eq!(ticks.len(), 12);
        assert_eq!(ticks[0].label, "Dec 2017");
        assert_eq!(ticks[1].label, "Jan 2018");
        assert_relative_eq!(ticks[0].position, 0.0);

        let sparse = scale.ticks(5);
        assert!(sparse.len() <= 5);
        assert!(!sparse.is_empty());
    }

    #[test]
    fn test_time_scale_single_day_ticks() {
        let day = NaiveDate::from_ymd_opt(2018, 3, 14).unwrap();
        let scale = TimeScale::new(day, day, (0.0, 100.0));
        let ticks = scale.ticks(10);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].label, "14 Mar");
        assert_relative_eq!(ticks[0].position, 50.0);
    }

    #[test]
    fn test_axis_scale_for_field() {
        let records = vec![
            Record::new(0, "01/12/2017", 0, 10.0),
            Record::new(1, "bad date", 5, 30.0),
            Record::new(2, "03/12/2017", 10, 20.0),
        ];
        let range = (0.0, 100.0);
        let date_scale = AxisScale::for_field(&records, Field::Date, range);
        let Some(AxisScale::Time(time)) = date_scale else {
            panic!("date field should build a time scale");
        };
        let second = NaiveDate::from_ymd_opt(2017, 12, 2).unwrap();
        assert_relative_eq!(time.scale(date_to_timestamp(second)), 50.0);

        let hour_scale = AxisScale::for_field(&records, Field::Hour, range);
        let Some(AxisScale::Linear(hours)) = hour_scale else {
            panic!("hour field should build a linear scale");
        };
        assert_eq!(hours.domain(), (0.0, 10.0));

        let snowfall = AxisScale::for_field(&records, Field::Snowfall, range);
        assert!(snowfall.is_none());
        assert!(AxisScale::for_field(&[], Field::Hour, range).is_none());
    }

    #[test]
    fn test_band_scale_positions() {
        let scale = BandScale::new((0..4).map(n).collect(), (0.0, 100.0));
        assert_relative_eq!(scale.bandwidth(), 25.0);
        assert_eq!(scale.position(&n(0)), Some(0.0));
        assert_eq!(scale.position(&n(3)), Some(75.0));
        assert_eq!(scale.position(&n(9)), None);
    }

    #[test]
    fn test_band_scale_reversed_puts_first_value_at_bottom() {
        let scale = BandScale::new((0..7).map(n).collect(), (70.0, 0.0));
        assert_eq!(scale.position(&n(0)), Some(60.0));
        assert_eq!(scale.position(&n(6)), Some(0.0));
    }

    #[test]
    fn test_band_scale_contiguous() {
        let scale = BandScale::new((0..24).map(n).collect(), (0.0, 480.0));
        for i in 0..23 {
            let end = scale.position_at(i).unwrap() + scale.bandwidth();
            assert_relative_eq!(end, scale.position_at(i + 1).unwrap());
        }
    }

    #[test]
    fn test_band_values_in_overlap() {
        let scale = BandScale::new((0..4).map(n).collect(), (0.0, 100.0));
        // Touches band 1 only at its right edge 50: bands 0..=1 overlap [10, 50]
        assert_eq!(scale.values_in(10.0, 50.0), vec![n(0), n(1)]);
        // A sliver into band 2 counts
        assert_eq!(scale.values_in(49.0, 50.5), vec![n(1), n(2)]);
        assert!(scale.values_in(100.0, 120.0).is_empty());
    }

    #[test]
    fn test_band_scale_empty_domain() {
        let scale = BandScale::new(Vec::new(), (0.0, 100.0));
        assert_eq!(scale.bandwidth(), 0.0);
        assert!(scale.values_in(0.0, 100.0).is_empty());
        assert!(scale.ticks(|v| v.to_string()).is_empty());
    }

    #[test]
    fn test_band_ticks_centered() {
        let scale = BandScale::new(vec![n(0), n(1)], (0.0, 100.0));
        let ticks = scale.ticks(|v| format!("d{v}"));
        assert_relative_eq!(ticks[0].position, 25.0);
        assert_eq!(ticks[1].label, "d1");
    }

    #[test]
    fn test_color_scale_domain_floor() {
        let scale = ColorScale::yl_gn_bu(0.0);
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.scale(0.0), YL_GN_BU[0]);

        let scale = ColorScale::yl_gn_bu(400.0);
        assert_eq!(scale.domain(), (0.0, 400.0));
        assert_eq!(scale.scale(400.0), YL_GN_BU[8]);
        assert_eq!(scale.scale(1e9), YL_GN_BU[8]);
        assert_eq!(scale.range(), (YL_GN_BU[0], YL_GN_BU[8]));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("-1000.5"), "-1,000.5");
        assert_eq!(group_thousands("999"), "999");
    }

    #[test]
    fn test_extent_skips_non_finite() {
        let values = [1.0, f64::NAN, -2.0, f64::INFINITY];
        assert_eq!(extent(values), Some((-2.0, 1.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }
}

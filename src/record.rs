//! Record model: one normalized dataset row, the scatter field list and the heatmap dimensions.
//!
//! [`Dimension::value_of`] is the single place where weekday/month/season/holiday/hour are
//! derived from a record. Both the aggregator and the cross-highlight matcher go through it, so
//! the week always starts on Monday (`Days = 0`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Source date format of the `Date` column (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `DD/MM/YYYY` date, returning `None` for anything malformed.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// One hourly rental observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Position in load order; unique and immutable identity key.
    pub index: usize,
    /// Raw date text as found in the source.
    pub date_text: String,
    /// Parsed date, `None` when the text is malformed.
    pub date: Option<NaiveDate>,
    /// Hour of day (0-23).
    pub hour: Option<u8>,
    /// Number of bikes rented in this hour.
    pub rented_count: Option<f64>,
    /// Temperature (°C).
    pub temperature: Option<f64>,
    /// Relative humidity (%).
    pub humidity: Option<f64>,
    /// Wind speed (m/s).
    pub wind_speed: Option<f64>,
    /// Visibility (10 m).
    pub visibility: Option<f64>,
    /// Dew point temperature (°C).
    pub dew_point_temperature: Option<f64>,
    /// Solar radiation (MJ/m²).
    pub solar_radiation: Option<f64>,
    /// Rainfall (mm).
    pub rainfall: Option<f64>,
    /// Snowfall (cm).
    pub snowfall: Option<f64>,
    /// Season label (`Winter`, `Spring`, ...); empty when missing.
    pub season: String,
    /// Holiday label (`Holiday` / `No Holiday`); empty when missing.
    pub holiday: String,
}

impl Record {
    /// Create a record with the identity, date, hour and rental count set.
    #[must_use]
    pub fn new(index: usize, date_text: &str, hour: u8, rented_count: f64) -> Self {
        Self {
            index,
            date_text: date_text.to_string(),
            date: parse_date(date_text),
            hour: Some(hour),
            rented_count: Some(rented_count),
            ..Self::default()
        }
    }

    /// Set the season label.
    #[must_use]
    pub fn with_season(mut self, season: &str) -> Self {
        self.season = season.to_string();
        self
    }

    /// Set the holiday label.
    #[must_use]
    pub fn with_holiday(mut self, holiday: &str) -> Self {
        self.holiday = holiday.to_string();
        self
    }

    /// Set one of the numeric measures. `Date` is ignored.
    #[must_use]
    pub fn with_measure(mut self, field: Field, value: f64) -> Self {
        if let Some(slot) = self.measure_mut(field) {
            *slot = Some(value);
        }
        self
    }

    /// Weekday with Monday = 0.
    #[must_use]
    pub fn weekday(&self) -> Option<u32> {
        self.date.map(|d| d.weekday().num_days_from_monday())
    }

    /// Month number 1-12.
    #[must_use]
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    fn measure_mut(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::Date | Field::Hour => None,
            Field::RentedBikeCount => Some(&mut self.rented_count),
            Field::Temperature => Some(&mut self.temperature),
            Field::Humidity => Some(&mut self.humidity),
            Field::WindSpeed => Some(&mut self.wind_speed),
            Field::Visibility => Some(&mut self.visibility),
            Field::DewPointTemperature => Some(&mut self.dew_point_temperature),
            Field::SolarRadiation => Some(&mut self.solar_radiation),
            Field::Rainfall => Some(&mut self.rainfall),
            Field::Snowfall => Some(&mut self.snowfall),
        }
    }
}

/// Seconds since the Unix epoch at midnight of `date`.
#[must_use]
pub fn date_to_timestamp(date: NaiveDate) -> f64 {
    date.and_hms_opt(0, 0, 0)
        .map_or(0.0, |dt| dt.and_utc().timestamp() as f64)
}

/// Fields selectable as scatterplot axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Field {
    /// Calendar date (time axis).
    Date,
    /// Rental count.
    RentedBikeCount,
    /// Hour of day.
    Hour,
    /// Temperature.
    Temperature,
    /// Humidity.
    Humidity,
    /// Wind speed.
    WindSpeed,
    /// Visibility.
    Visibility,
    /// Dew point temperature.
    DewPointTemperature,
    /// Solar radiation.
    SolarRadiation,
    /// Rainfall.
    Rainfall,
    /// Snowfall.
    Snowfall,
}

impl Field {
    /// Every field, in menu order.
    pub const ALL: [Self; 11] = [
        Self::Date,
        Self::RentedBikeCount,
        Self::Hour,
        Self::Temperature,
        Self::Humidity,
        Self::WindSpeed,
        Self::Visibility,
        Self::DewPointTemperature,
        Self::SolarRadiation,
        Self::Rainfall,
        Self::Snowfall,
    ];

    /// Whether the field is date-valued (time scale).
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date)
    }

    /// Column/field name as used in the source header and the UI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::RentedBikeCount => "RentedBikeCount",
            Self::Hour => "Hour",
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::WindSpeed => "WindSpeed",
            Self::Visibility => "Visibility",
            Self::DewPointTemperature => "DewPointTemperature",
            Self::SolarRadiation => "SolarRadiation",
            Self::Rainfall => "Rainfall",
            Self::Snowfall => "Snowfall",
        }
    }

    /// Position of the record along this field.
    ///
    /// Dates map to epoch seconds; `None` when the value is missing or unparsable.
    #[must_use]
    pub fn value_of(self, record: &Record) -> Option<f64> {
        let value = match self {
            Self::Date => record.date.map(date_to_timestamp),
            Self::Hour => record.hour.map(f64::from),
            Self::RentedBikeCount => record.rented_count,
            Self::Temperature => record.temperature,
            Self::Humidity => record.humidity,
            Self::WindSpeed => record.wind_speed,
            Self::Visibility => record.visibility,
            Self::DewPointTemperature => record.dew_point_temperature,
            Self::SolarRadiation => record.solar_radiation,
            Self::Rainfall => record.rainfall,
            Self::Snowfall => record.snowfall,
        };
        value.filter(|v| v.is_finite())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s.trim())
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Categorical/temporal groupings usable as heatmap axes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Dimension {
    /// Hour of day, 0-23.
    Hours,
    /// Weekday, 0-6 with Monday = 0.
    Days,
    /// Season label (observed values).
    Seasons,
    /// Month, 1-12.
    Months,
    /// Holiday label (observed values).
    Holiday,
}

impl Dimension {
    /// Every dimension, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Hours,
        Self::Days,
        Self::Seasons,
        Self::Months,
        Self::Holiday,
    ];

    /// Name as used in the UI and in selection pairs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hours => "Hours",
            Self::Days => "Days",
            Self::Seasons => "Seasons",
            Self::Months => "Months",
            Self::Holiday => "Holiday",
        }
    }

    /// Whether the dimension is derived from the record's date.
    #[must_use]
    pub const fn depends_on_date(self) -> bool {
        matches!(self, Self::Days | Self::Months)
    }

    /// The domain fixed by the dimension kind, `None` for observed (open) domains.
    #[must_use]
    pub fn fixed_domain(self) -> Option<Vec<DimensionValue>> {
        let range = match self {
            Self::Hours => 0..24,
            Self::Days => 0..7,
            Self::Months => 1..13,
            Self::Seasons | Self::Holiday => return None,
        };
        Some(range.map(DimensionValue::Number).collect())
    }

    /// Derive this dimension's value for a record.
    ///
    /// `None` when the underlying date/hour is unusable or the label is empty.
    #[must_use]
    pub fn value_of(self, record: &Record) -> Option<DimensionValue> {
        match self {
            Self::Hours => record.hour.map(|h| DimensionValue::Number(u32::from(h))),
            Self::Days => record.weekday().map(DimensionValue::Number),
            Self::Months => record.month().map(DimensionValue::Number),
            Self::Seasons => DimensionValue::label(&record.season),
            Self::Holiday => DimensionValue::label(&record.holiday),
        }
    }

    /// Axis tick label for a value of this dimension.
    #[must_use]
    pub fn tick_label(self, value: &DimensionValue) -> String {
        const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        const MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];

        match (self, value) {
            (Self::Days, DimensionValue::Number(n)) => DAYS
                .get(*n as usize)
                .map_or_else(|| n.to_string(), |d| (*d).to_string()),
            (Self::Months, DimensionValue::Number(n)) => (*n as usize)
                .checked_sub(1)
                .and_then(|i| MONTHS.get(i))
                .map_or_else(|| n.to_string(), |m| (*m).to_string()),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dim| dim.name() == s.trim())
            .ok_or_else(|| Error::UnknownDimension(s.to_string()))
    }
}

/// A value along a heatmap dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionValue {
    /// Hour, weekday or month number.
    Number(u32),
    /// Season or holiday label.
    Label(String),
}

impl DimensionValue {
    /// A label value, `None` for empty text.
    #[must_use]
    pub fn label(text: &str) -> Option<Self> {
        let text = text.trim();
        (!text.is_empty()).then(|| Self::Label(text.to_string()))
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(s) => f.write_str(s),
        }
    }
}

impl From<u32> for DimensionValue {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for DimensionValue {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

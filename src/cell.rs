use std::fmt;

use calamine::Data;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date layouts tried on textual cells
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Time of day layouts that may follow a date, separated by a space or `T`
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// A loosely typed spreadsheet cell
///
/// Cells keep the type the spreadsheet stored them with. The transform decides
/// per column whether a value is coerced to text, parsed as a date, or passed
/// through unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// A spreadsheet error literal such as `#N/A`
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The cell rendered as text
    ///
    /// Empty cells become an empty string, and whole floats lose their
    /// fractional part, so a CVE number stored as `12345.0` reads `12345`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// The calendar date the cell holds, if any
    ///
    /// Date cells convert directly, text is parsed leniently. Anything else,
    /// including bare numbers, is not a date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::DateTime(datetime) => Some(datetime.date()),
            Self::Text(text) => parse_date(text),
            _ => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::String(text) => Self::Text(text.clone()),
            Data::Int(n) => Self::Int(*n),
            Data::Float(n) => Self::Float(*n),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(datetime) if datetime.is_datetime() => datetime
                .as_datetime()
                .map(Self::DateTime)
                .unwrap_or_else(|| Self::Float(datetime.as_f64())),
            // durations are stored as day fractions
            Data::DateTime(duration) => Self::Float(duration.as_f64()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Self::Text(text.clone()),
            Data::Error(error) => Self::Error(error.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::DateTime(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S")),
            Self::Error(error) => f.write_str(error),
        }
    }
}

impl serde::Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: serde::Serializer
    {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(text) | Self::Error(text) => serializer.serialize_str(text),
            Self::Int(n) => serializer.serialize_i64(*n),
            // spreadsheets store every number as a float
            Self::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => serializer.serialize_i64(*n as i64),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::DateTime(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

/// Parses a textual date, dropping any time of day
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }

    for date_format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, date_format) {
            return Some(date);
        }

        for separator in [" ", "T"] {
            for time_format in TIME_FORMATS {
                let layout = format!("{date_format}{separator}{time_format}");
                if let Ok(datetime) = NaiveDateTime::parse_from_str(text, &layout) {
                    return Some(datetime.date());
                }
            }
        }
    }

    None
}

use std::fmt;

use jiff::civil::Date;

/// Invalid arguments to event construction or simulation setup.
///
/// Every variant is raised before any computation runs; a query that finds no
/// qualifying day is not an error (see [`crate::query::SENTINEL_DATE`]).
#[derive(Debug)]
pub enum CastError {
    /// Year/month/day components that do not form a calendar date
    InvalidDate { year: i16, month: i8, day: i8 },
    /// A date string that could not be parsed as `YYYY-MM-DD`
    DateParse { input: String, source: jiff::Error },
    /// Window whose start falls after its end
    InvalidWindow { start: Date, end: Date },
    /// Window too long to enumerate day by day
    WindowTooLong { days: i32, max_days: i32 },
    /// Date arithmetic that left jiff's supported range
    DateArithmetic(jiff::Error),
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastError::InvalidDate { year, month, day } => {
                write!(f, "invalid calendar date {year:04}-{month:02}-{day:02}")
            }
            CastError::DateParse { input, source } => {
                write!(f, "cannot parse date {input:?}: {source}")
            }
            CastError::InvalidWindow { start, end } => {
                write!(f, "window start {start} is after window end {end}")
            }
            CastError::WindowTooLong { days, max_days } => {
                write!(f, "window spans {days} days (limit is {max_days})")
            }
            CastError::DateArithmetic(e) => write!(f, "date calculation error: {e}"),
        }
    }
}

impl From<jiff::Error> for CastError {
    fn from(err: jiff::Error) -> Self {
        CastError::DateArithmetic(err)
    }
}

impl std::error::Error for CastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CastError::DateParse { source, .. } => Some(source),
            CastError::DateArithmetic(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from a market data source
#[derive(Debug, Clone, PartialEq)]
pub enum PriceError {
    UnknownTicker(String),
    InvalidPrice { ticker: String, price: f64 },
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::UnknownTicker(ticker) => write!(f, "no quote for ticker {ticker}"),
            PriceError::InvalidPrice { ticker, price } => {
                write!(f, "invalid price {price} for ticker {ticker}")
            }
        }
    }
}

impl std::error::Error for PriceError {}

pub type Result<T> = std::result::Result<T, CastError>;

//! Market data seam and equity grant events
//!
//! The engine never fetches prices itself. A [`PriceSource`] is handed to the
//! grant producer by the caller, which turns a vesting schedule and the
//! latest quote into an ordinary [`Event`].

use std::collections::HashMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::PriceError;
use crate::model::Event;

/// Latest known unit price for a ticker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub as_of: Date,
}

pub trait PriceSource {
    fn latest_quote(&self, ticker: &str) -> Result<Quote, PriceError>;
}

/// In-memory quotes, e.g. read from a plan file
#[derive(Debug, Clone, Default)]
pub struct FixedPrices {
    quotes: HashMap<String, Quote>,
}

impl FixedPrices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quote(mut self, ticker: impl Into<String>, price: f64, as_of: Date) -> Self {
        self.quotes
            .insert(ticker.into().to_uppercase(), Quote { price, as_of });
        self
    }
}

impl PriceSource for FixedPrices {
    fn latest_quote(&self, ticker: &str) -> Result<Quote, PriceError> {
        self.quotes
            .get(&ticker.to_uppercase())
            .copied()
            .ok_or_else(|| PriceError::UnknownTicker(ticker.to_string()))
    }
}

fn default_tax_rate() -> f64 {
    0.4
}

fn default_vesting_years() -> u32 {
    4
}

/// A restricted stock grant that vests evenly over several years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockGrant {
    pub ticker: String,
    pub total_shares: f64,
    /// Fraction withheld at vest
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_vesting_years")]
    pub vesting_years: u32,
}

impl StockGrant {
    #[must_use]
    pub fn new(ticker: impl Into<String>, total_shares: f64) -> Self {
        Self {
            ticker: ticker.into(),
            total_shares,
            tax_rate: default_tax_rate(),
            vesting_years: default_vesting_years(),
        }
    }

    #[must_use]
    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    #[must_use]
    pub fn vesting_years(mut self, years: u32) -> Self {
        self.vesting_years = years.max(1);
        self
    }

    pub fn shares_per_vest(&self) -> f64 {
        self.total_shares / f64::from(self.vesting_years.max(1))
    }

    /// One vest's after-tax value at the latest quote, as an event on `date`.
    /// Expand it yearly to model the whole schedule.
    pub fn grant_event(&self, source: &impl PriceSource, date: Date) -> Result<Event, PriceError> {
        let quote = source.latest_quote(&self.ticker)?;
        if !quote.price.is_finite() || quote.price < 0.0 {
            return Err(PriceError::InvalidPrice {
                ticker: self.ticker.clone(),
                price: quote.price,
            });
        }

        let amount = self.shares_per_vest() * quote.price * (1.0 - self.tax_rate);
        Ok(Event::new(
            format!("{} Stock Grant", self.ticker.to_uppercase()),
            amount,
            date,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_grant_event_amount() {
        let prices = FixedPrices::new().quote("goog", 150.0, date(2025, 1, 2));
        let grant = StockGrant::new("GOOG", 400.0);

        let event = grant.grant_event(&prices, date(2025, 3, 15)).unwrap();
        assert_eq!(event.name, "GOOG Stock Grant");
        assert_eq!(event.date, date(2025, 3, 15));
        // 100 shares/year * $150 * 60% kept
        assert!((event.amount - 9_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_grant_event_unknown_ticker() {
        let prices = FixedPrices::new();
        let err = StockGrant::new("MSFT", 10.0)
            .grant_event(&prices, date(2025, 1, 1))
            .unwrap_err();
        assert_eq!(err, PriceError::UnknownTicker("MSFT".to_string()));
    }

    #[test]
    fn test_grant_rejects_negative_price() {
        let prices = FixedPrices::new().quote("BAD", -1.0, date(2025, 1, 1));
        let err = StockGrant::new("BAD", 10.0)
            .grant_event(&prices, date(2025, 1, 1))
            .unwrap_err();
        assert!(matches!(err, PriceError::InvalidPrice { .. }));
    }
}

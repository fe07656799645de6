//! Configuration for the storefront domain.
//!
//! Loads settings from environment variables with sensible defaults. Unset
//! variables fall back to the default; set but malformed ones are an error.

use crate::types::PriceRange;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors from configuration loading
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be used
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Storefront settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// How many recently viewed records are kept
    pub recently_viewed_capacity: usize,
    /// How many recently viewed products are shown
    pub recent_display_limit: usize,
    /// Price range restored by `RESET_FILTERS`
    pub default_price_range: PriceRange,
    /// Subtotals above this ship for free
    pub free_shipping_threshold: f64,
    /// Shipping fee below the threshold
    pub shipping_fee: f64,
    /// Action type prefixes reported by the analytics middleware
    pub analytics_prefixes: Vec<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            recently_viewed_capacity: 10,
            recent_display_limit: 5,
            default_price_range: PriceRange::default(),
            free_shipping_threshold: 100.0,
            shipping_fee: 9.99,
            analytics_prefixes: vec![
                "ADD_TO_CART".to_string(),
                "REMOVE_FROM_CART".to_string(),
                "ADD_TO_WISHLIST".to_string(),
            ],
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that does not parse or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that does not parse or is out of range.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront::config::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::from_lookup(|key| match key {
    ///     "STOREFRONT_RECENTLY_VIEWED_CAPACITY" => Some("3".to_string()),
    ///     _ => None,
    /// })?;
    ///
    /// assert_eq!(config.recently_viewed_capacity, 3);
    /// assert_eq!(config.recent_display_limit, 5);
    /// # Ok::<(), storefront::config::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min = parse(&lookup, "STOREFRONT_PRICE_MIN")?.unwrap_or(defaults.default_price_range.min);
        let max = parse(&lookup, "STOREFRONT_PRICE_MAX")?.unwrap_or(defaults.default_price_range.max);
        if min > max {
            return Err(ConfigError::InvalidValue {
                key: "STOREFRONT_PRICE_MIN",
                value: min.to_string(),
                reason: format!("greater than STOREFRONT_PRICE_MAX ({max})"),
            });
        }

        let analytics_prefixes = lookup("STOREFRONT_ANALYTICS_PREFIXES").map_or(
            defaults.analytics_prefixes,
            |raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string)
                    .collect()
            },
        );

        Ok(Self {
            recently_viewed_capacity: parse(&lookup, "STOREFRONT_RECENTLY_VIEWED_CAPACITY")?
                .unwrap_or(defaults.recently_viewed_capacity),
            recent_display_limit: parse(&lookup, "STOREFRONT_RECENT_DISPLAY_LIMIT")?
                .unwrap_or(defaults.recent_display_limit),
            default_price_range: PriceRange::new(min, max),
            free_shipping_threshold: non_negative(
                &lookup,
                "STOREFRONT_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            shipping_fee: non_negative(&lookup, "STOREFRONT_SHIPPING_FEE", defaults.shipping_fee)?,
            analytics_prefixes,
        })
    }

    /// Set the recently viewed capacity
    #[must_use]
    pub const fn with_recently_viewed_capacity(mut self, capacity: usize) -> Self {
        self.recently_viewed_capacity = capacity;
        self
    }

    /// Set the recently viewed display limit
    #[must_use]
    pub const fn with_recent_display_limit(mut self, limit: usize) -> Self {
        self.recent_display_limit = limit;
        self
    }

    /// Set the price range restored by `RESET_FILTERS`
    #[must_use]
    pub const fn with_default_price_range(mut self, min: f64, max: f64) -> Self {
        self.default_price_range = PriceRange::new(min, max);
        self
    }

    /// Set the free shipping threshold and the fee charged below it
    #[must_use]
    pub const fn with_shipping(mut self, free_shipping_threshold: f64, shipping_fee: f64) -> Self {
        self.free_shipping_threshold = free_shipping_threshold;
        self.shipping_fee = shipping_fee;
        self
    }

    /// Replace the analytics prefixes
    #[must_use]
    pub fn with_analytics_prefixes<I, P>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.analytics_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        })
}

fn non_negative<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse::<f64, F>(lookup, key)?.unwrap_or(default);
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "must be a non-negative number".to_string(),
        })
    }
}

use anchor_lang::prelude::*;
use serde::Deserialize;

use crate::{error::LotteryError, state::PrizeTemplate};

/// Settings for one prize level as read from configuration.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PrizeSettings {
    pub probability: f64,
    pub count: u32,
    pub name: String,
}

/// Lottery section of the host configuration.
///
/// ```json
/// {
///   "default_prize_config": {
///     "special": { "probability": 0.01, "count": 1, "name": "Game console" },
///     "first":   { "probability": 0.05, "count": 3, "name": "Headphones" }
///   }
/// }
/// ```
///
/// Level names are case-insensitive and their order is the template order.
#[derive(Deserialize, Clone, Debug)]
pub struct LotteryConfig {
    pub default_prize_config: serde_json::Map<String, serde_json::Value>,
}

impl LotteryConfig {
    /// # Errors
    /// - `MalformedConfig` if the document is not valid JSON of the expected shape
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            msg!("[Lottery] invalid lottery config: {}", e);
            error!(LotteryError::MalformedConfig)
        })
    }

    /// Validates the prize section and builds the template.
    ///
    /// # Errors
    /// - `MalformedConfig` if a level's settings do not parse
    /// - any error of [`PrizeTemplate::from_entries`]
    pub fn prize_template(&self) -> Result<PrizeTemplate> {
        let mut entries = Vec::with_capacity(self.default_prize_config.len());
        for (key, value) in &self.default_prize_config {
            let settings = PrizeSettings::deserialize(value).map_err(|e| {
                msg!("[Lottery] invalid settings for level {}: {}", key, e);
                error!(LotteryError::MalformedConfig)
            })?;
            entries.push((key.as_str(), settings));
        }
        PrizeTemplate::from_entries(entries)
    }
}

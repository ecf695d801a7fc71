//=========================================================================
// Storefront Configuration
//=========================================================================
//
// Static settings for one storefront page.
//
// Sources:
//   StorefrontConfig::default()   → built-in storefront
//   StorefrontConfig::load(path)  → JSON file, missing keys take defaults
//
// `validate()` runs after loading and rejects settings that would make
// a behaviour meaningless (non-positive durations, unusable channel URL).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//=== Internal Dependencies ===============================================

use crate::core::animation::AnimationSettings;
use crate::core::messaging::{DEFAULT_CHANNEL_URL, DEFAULT_PHONE_NUMBER};

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid channel URL {url:?}: {source}")]
    InvalidChannelUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Channel URL {0:?} must use http or https")]
    UnsupportedChannelScheme(String),

    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

//=== Page Content ========================================================

/// Headline number animated by a counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    /// Raw `data-target` value; non-numeric values count as 0.
    pub target: String,
}

/// Customer review shown in the marquee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
}

//=== StorefrontConfig ====================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub window_title: String,

    /// Number orders are sent to; falls back to the channel if unusable.
    pub phone_number: String,
    pub channel_url: String,

    pub hero_image: String,
    pub logo_image: String,

    pub animation: AnimationSettings,

    /// Scroll offset below which the order bar stays hidden.
    pub order_bar_threshold: f64,

    /// Persisted-flag key for the dark mode preference.
    pub dark_mode_key: String,

    pub stats: Vec<Stat>,
    pub testimonials: Vec<Testimonial>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            window_title: "Storefront".to_string(),
            phone_number: DEFAULT_PHONE_NUMBER.to_string(),
            channel_url: DEFAULT_CHANNEL_URL.to_string(),
            hero_image: "1.png".to_string(),
            logo_image: "logo.png".to_string(),
            animation: AnimationSettings::default(),
            order_bar_threshold: 120.0,
            dark_mode_key: "jp_dark".to_string(),
            stats: vec![
                stat("Happy customers", "1200"),
                stat("Orders delivered", "3500"),
                stat("Years of tradition", "25"),
            ],
            testimonials: vec![
                testimonial("Priya", "The garlic murukku tastes just like home."),
                testimonial("Arjun", "Fresh, crunchy and delivered quickly."),
                testimonial("Meena", "The dry fruit laddoo is our festival favourite."),
                testimonial("Karthik", "Ordering over chat took a minute."),
            ],
        }
    }
}

fn stat(label: &str, target: &str) -> Stat {
    Stat {
        label: label.to_string(),
        target: target.to_string(),
    }
}

fn testimonial(author: &str, quote: &str) -> Testimonial {
    Testimonial {
        author: author.to_string(),
        quote: quote.to_string(),
    }
}

impl StorefrontConfig {
    //--- Loading ----------------------------------------------------------

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    //--- Validation -------------------------------------------------------

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.channel_url).map_err(|source| ConfigError::InvalidChannelUrl {
            url: self.channel_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedChannelScheme(self.channel_url.clone()));
        }

        let animation = &self.animation;
        positive("animation.counter_duration_ms", animation.counter_duration_ms)?;
        positive("animation.marquee_speed", animation.marquee_speed)?;
        fraction("animation.counter_threshold", animation.counter_threshold)?;
        fraction("animation.reveal_threshold", animation.reveal_threshold)?;
        non_negative("animation.stagger_step_ms", animation.stagger_step_ms)?;
        non_negative("animation.reveal_delay_ms", animation.reveal_delay_ms)?;
        non_negative("order_bar_threshold", self.order_bar_threshold)?;

        if self.dark_mode_key.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "dark_mode_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

//--- Validation Helpers --------------------------------------------------

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            reason: format!("must be positive, got {}", value),
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            reason: format!("must not be negative, got {}", value),
        })
    }
}

fn fraction(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            reason: format!("must be within [0, 1], got {}", value),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.animation.counter_duration_ms, 1400.0);
        assert_eq!(config.dark_mode_key, "jp_dark");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = StorefrontConfig::from_json(
            r#"{ "phone_number": "+441234567", "animation": { "marquee_speed": 1.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.phone_number, "+441234567");
        assert_eq!(config.animation.marquee_speed, 1.5);
        assert_eq!(config.animation.reveal_threshold, 0.12);
        assert_eq!(config.testimonials.len(), 4);
    }

    #[test]
    fn rejects_unparseable_channel_url() {
        let err = StorefrontConfig::from_json(r#"{ "channel_url": "not a url" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannelUrl { .. }));
    }

    #[test]
    fn rejects_non_web_channel_url() {
        let err = StorefrontConfig::from_json(r#"{ "channel_url": "ftp://example.com/x" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedChannelScheme(_)));
    }

    #[test]
    fn rejects_out_of_range_settings() {
        let err = StorefrontConfig::from_json(r#"{ "animation": { "counter_duration_ms": 0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "animation.counter_duration_ms", .. }
        ));

        let err = StorefrontConfig::from_json(r#"{ "animation": { "reveal_threshold": 1.5 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(StorefrontConfig::from_json("[1, 2"), Err(ConfigError::Json(_))));
    }
}

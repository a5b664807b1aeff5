//! `[enhance]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [enhance]
//! locale = "en-GB"        # Tooltip date format
//! absent_bid = "null"     # Comment boundaries without a bid
//! highlight_ms = 1500     # How long click/navigation highlights last
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::enhance::{AbsentBid, EnhanceOptions};
use crate::runtime::DEFAULT_HIGHLIGHT;
use crate::utils::date::DateLocale;

/// Enhancement settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Locale tag for suggestion tooltip dates.
    ///
    /// Kept as written so an unknown tag is reported during validation
    /// together with the supported ones.
    pub locale: String,

    /// `omit` (default) or `null`.
    pub absent_bid: AbsentBid,

    /// Highlight duration in milliseconds.
    pub highlight_ms: u64,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            locale: DateLocale::default().tag().to_string(),
            absent_bid: AbsentBid::default(),
            highlight_ms: DEFAULT_HIGHLIGHT.as_millis() as u64,
        }
    }
}

impl EnhanceConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.locale.parse::<DateLocale>().is_err() {
            let supported: Vec<_> = DateLocale::ALL.iter().map(|l| l.tag()).collect();
            diag.error_with_hint(
                "enhance.locale",
                format!("unknown locale `{}`", self.locale),
                format!("supported locales: {}", supported.join(", ")),
            );
        }
        if self.highlight_ms == 0 {
            diag.error("enhance.highlight_ms", "must be greater than 0");
        }
    }

    /// Parsed locale; falls back to the default for an unknown tag.
    pub fn date_locale(&self) -> DateLocale {
        self.locale.parse().unwrap_or_default()
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn options(&self) -> EnhanceOptions {
        EnhanceOptions {
            locale: self.date_locale(),
            absent_bid: self.absent_bid,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::enhance::AbsentBid;
    use crate::utils::date::DateLocale;

    #[test]
    fn test_enhance_config() {
        let config = test_parse_config(
            "[enhance]\nlocale = \"de-DE\"\nabsent_bid = \"null\"\nhighlight_ms = 500",
        );

        assert_eq!(config.enhance.date_locale(), DateLocale::DeDe);
        assert_eq!(config.enhance.absent_bid, AbsentBid::Null);
        assert_eq!(config.enhance.highlight().as_millis(), 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_enhance_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.enhance.locale, "en-US");
        assert_eq!(config.enhance.absent_bid, AbsentBid::Omit);
        assert_eq!(config.enhance.highlight_ms, 2000);
    }

    #[test]
    fn test_unknown_locale_has_hint() {
        let config = test_parse_config("[enhance]\nlocale = \"xx-YY\"");
        let err = config.validate().unwrap_err();

        let [diagnostic] = err.errors() else {
            panic!("expected one error, got {}", err.len());
        };
        assert_eq!(diagnostic.field, "enhance.locale");
        assert!(diagnostic.hint.as_deref().unwrap().contains("en-GB"));
        assert_eq!(config.enhance.date_locale(), DateLocale::EnUs);
    }

    #[test]
    fn test_zero_highlight_rejected() {
        let config = test_parse_config("[enhance]\nhighlight_ms = 0");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_absent_bid_is_parse_error() {
        let result: Result<crate::config::SemdocConfig, _> =
            toml::from_str("[enhance]\nabsent_bid = \"skip\"");
        assert!(result.is_err());
    }
}

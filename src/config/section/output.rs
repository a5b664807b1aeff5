//! `[output]` section configuration.
//!
//! ```toml
//! [output]
//! pretty = true   # Indent JSON printed by `query` and `navigate`
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_output_config() {
        assert!(!test_parse_config("").output.pretty);
        assert!(test_parse_config("[output]\npretty = true").output.pretty);
    }
}

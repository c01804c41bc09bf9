//! Serializable description of [`NanoIdOptions`].
//!
//! ```json
//! { "alphabet": { "preset": "numbers" }, "size": 12 }
//! { "alphabet": { "letters": "qwerty123" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::alphabet::{Alphabet, AlphabetError, KnownAlphabet};
use crate::nanoid::DEFAULT_SIZE;
use crate::options::NanoIdOptions;

/// Either a named preset or custom letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetConfig {
    Preset(KnownAlphabet),
    Letters(String),
}

impl Default for AlphabetConfig {
    fn default() -> Self {
        Self::Preset(KnownAlphabet::default())
    }
}

impl AlphabetConfig {
    pub fn to_alphabet(&self) -> Result<Alphabet, AlphabetError> {
        match self {
            Self::Preset(known) => Ok(known.alphabet().clone()),
            Self::Letters(letters) => Alphabet::new(letters),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsConfig {
    #[serde(default)]
    pub alphabet: AlphabetConfig,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_size() -> i64 {
    DEFAULT_SIZE as i64
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetConfig::default(),
            size: default_size(),
        }
    }
}

impl TryFrom<&OptionsConfig> for NanoIdOptions {
    type Error = AlphabetError;

    fn try_from(config: &OptionsConfig) -> Result<Self, Self::Error> {
        Ok(NanoIdOptions::new(config.alphabet.to_alphabet()?, config.size))
    }
}

impl TryFrom<OptionsConfig> for NanoIdOptions {
    type Error = AlphabetError;

    fn try_from(config: OptionsConfig) -> Result<Self, Self::Error> {
        NanoIdOptions::try_from(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_config() {
        let config: OptionsConfig =
            serde_json::from_str(r#"{"alphabet": {"preset": "numbers"}, "size": 12}"#).unwrap();
        let options = NanoIdOptions::try_from(config).unwrap();
        assert_eq!(options.alphabet(), KnownAlphabet::Numbers.alphabet());
        assert_eq!(options.size(), 12);
    }

    #[test]
    fn test_defaults() {
        let config: OptionsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, OptionsConfig::default());
        let options = NanoIdOptions::try_from(&config).unwrap();
        assert_eq!(options, NanoIdOptions::default());
    }

    #[test]
    fn test_custom_letters() {
        let config: OptionsConfig =
            serde_json::from_str(r#"{"alphabet": {"letters": "qwerty123"}, "size": -4}"#).unwrap();
        let options = NanoIdOptions::try_from(config).unwrap();
        assert_eq!(options.alphabet().letters(), "qwerty123");
        assert_eq!(options.size(), 0);
    }

    #[test]
    fn test_invalid_letters_are_rejected() {
        let config = OptionsConfig {
            alphabet: AlphabetConfig::Letters(String::new()),
            size: 5,
        };
        assert!(NanoIdOptions::try_from(config).unwrap_err().is_too_small());
    }

    #[test]
    fn test_unknown_preset_fails_to_deserialize() {
        let result: Result<OptionsConfig, _> =
            serde_json::from_str(r#"{"alphabet": {"preset": "base58"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_preset_name() {
        let json = serde_json::to_value(OptionsConfig::default()).unwrap();
        assert_eq!(json["alphabet"]["preset"], "url_safe");
        assert_eq!(json["size"], 21);
    }
}

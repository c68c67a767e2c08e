use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use versus_search::Strategy;

pub const DEFAULT_BANK_COUNT: u32 = 15;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 200;
/// Side turns, so 1000 rounds.
pub const DEFAULT_MAX_TURNS: u32 = 2000;
pub const MAX_BANK_COUNT: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("invalid value `{value}` for `{option}`: {reason}")]
    InvalidValue {
        option: &'static str,
        value: String,
        reason: String,
    },
    #[error("unknown strategy `{name}` for `{option}` (expected balanced, aggressive or defensive)")]
    UnknownStrategy { option: &'static str, name: String },
}

/// Everything needed to set up one match. Keys use camelCase when
/// (de)serialized; missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    pub bank_count_per_type: u32,
    /// `None` lets every search run to completion.
    pub time_budget_ms: Option<u64>,
    pub max_turns: u32,
    pub seed: u64,
    pub strategy_a: Strategy,
    pub strategy_b: Strategy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bank_count_per_type: DEFAULT_BANK_COUNT,
            time_budget_ms: Some(DEFAULT_TIME_BUDGET_MS),
            max_turns: DEFAULT_MAX_TURNS,
            seed: 0,
            strategy_a: Strategy::Balanced,
            strategy_b: Strategy::Aggressive,
        }
    }
}

fn invalid(option: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        option,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T>(option: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| invalid(option, value, e))
}

fn parse_strategy(option: &'static str, value: &str) -> Result<Strategy, ConfigError> {
    value.parse().map_err(|_| ConfigError::UnknownStrategy {
        option,
        name: value.to_string(),
    })
}

impl MatchConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Set one option from its textual form, as a command line or
    /// environment would supply it. Accepts camelCase and snake_case keys.
    pub fn set(&mut self, option: &str, value: &str) -> Result<(), ConfigError> {
        match option {
            "bankCountPerType" | "bank_count_per_type" => {
                self.bank_count_per_type = parse_number("bankCountPerType", value)?;
            }
            "timeBudgetMs" | "time_budget_ms" => {
                self.time_budget_ms = match value.trim() {
                    "none" | "unbounded" => None,
                    v => Some(parse_number("timeBudgetMs", v)?),
                };
            }
            "maxTurns" | "max_turns" => {
                self.max_turns = parse_number("maxTurns", value)?;
            }
            "seed" => {
                self.seed = parse_number("seed", value)?;
            }
            "strategyA" | "strategy_a" => {
                self.strategy_a = parse_strategy("strategyA", value)?;
            }
            "strategyB" | "strategy_b" => {
                self.strategy_b = parse_strategy("strategyB", value)?;
            }
            other => return Err(ConfigError::UnknownOption(other.to_string())),
        }
        Ok(())
    }

    /// Build from `(option, value)` pairs on top of the defaults, then validate.
    pub fn from_options<'a, I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (option, value) in options {
            config.set(option, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bank_count_per_type > MAX_BANK_COUNT {
            return Err(invalid(
                "bankCountPerType",
                &self.bank_count_per_type.to_string(),
                format!("at most {MAX_BANK_COUNT} pieces per type"),
            ));
        }
        if self.max_turns == 0 {
            return Err(invalid("maxTurns", "0", "a match needs at least one turn"));
        }
        if self.time_budget_ms == Some(0) {
            return Err(invalid(
                "timeBudgetMs",
                "0",
                "use `none` for an unbounded search",
            ));
        }
        check_strategy("strategyA", &self.strategy_a)?;
        check_strategy("strategyB", &self.strategy_b)?;
        Ok(())
    }
}

fn check_strategy(option: &'static str, strategy: &Strategy) -> Result<(), ConfigError> {
    let w = strategy.weights();
    if [w.height, w.holes, w.bumpiness, w.lines_cleared]
        .iter()
        .all(|v| v.is_finite())
    {
        Ok(())
    } else {
        Err(invalid(option, strategy.name(), "weights must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_eval::EvalWeights;

    #[test]
    fn test_defaults_are_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.bank_count_per_type, 15);
        assert_eq!(config.time_budget(), Some(Duration::from_millis(200)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_set_from_strings() {
        let config = MatchConfig::from_options([
            ("bankCountPerType", "12"),
            ("time_budget_ms", "none"),
            ("maxTurns", "50"),
            ("seed", "99"),
            ("strategyA", "Defensive"),
            ("strategy_b", "balanced"),
        ])
        .expect("valid options");
        assert_eq!(config.bank_count_per_type, 12);
        assert_eq!(config.time_budget(), None);
        assert_eq!(config.max_turns, 50);
        assert_eq!(config.seed, 99);
        assert_eq!(config.strategy_a, Strategy::Defensive);
        assert_eq!(config.strategy_b, Strategy::Balanced);
    }

    #[test]
    fn test_negative_bank_count_names_option() {
        let err = MatchConfig::from_options([("bankCountPerType", "-3")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { option: "bankCountPerType", .. }
        ));
        assert!(err.to_string().contains("bankCountPerType"));
    }

    #[test]
    fn test_unknown_strategy_and_option() {
        let err = MatchConfig::from_options([("strategyB", "reckless")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownStrategy {
                option: "strategyB",
                name: "reckless".to_string()
            }
        );
        let err = MatchConfig::from_options([("colour", "red")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("colour".to_string()));
    }

    #[test]
    fn test_validate_ranges() {
        let config = MatchConfig {
            max_turns: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { option: "maxTurns", .. })
        ));

        let config = MatchConfig {
            time_budget_ms: Some(0),
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            bank_count_per_type: MAX_BANK_COUNT + 1,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatchConfig {
            strategy_a: Strategy::Custom {
                weights: EvalWeights::new(f32::NAN, 0.0, 0.0, 0.0),
                preference: Vec::new(),
            },
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { option: "strategyA", .. })
        ));
    }

    #[test]
    fn test_json_keys() {
        let config: MatchConfig = serde_json::from_str(
            r#"{"bankCountPerType": 13, "timeBudgetMs": null, "strategyA": "aggressive"}"#,
        )
        .expect("deserialize");
        assert_eq!(config.bank_count_per_type, 13);
        assert_eq!(config.time_budget_ms, None);
        assert_eq!(config.strategy_a, Strategy::Aggressive);
        assert_eq!(config.max_turns, DEFAULT_MAX_TURNS);
        assert_eq!(config.strategy_b, Strategy::Aggressive);
    }
}

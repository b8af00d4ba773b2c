use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub trending: TrendingConfig,
    pub corpus: CorpusConfig,
    pub censor: CensorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    pub window_hours: i64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self { window_hours: 24 }
    }
}

impl TrendingConfig {
    /// The window as a duration; negative or unrepresentable hours are rejected
    pub fn window(&self) -> AppResult<TimeDelta> {
        if self.window_hours < 0 {
            return Err(AppError::Configuration(format!(
                "TRENDING_WINDOW_HOURS must not be negative, got {}",
                self.window_hours
            )));
        }
        TimeDelta::try_hours(self.window_hours).ok_or_else(|| {
            AppError::Configuration(format!(
                "TRENDING_WINDOW_HOURS is out of range, got {}",
                self.window_hours
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub min_word_length: usize,
    pub top_k: usize,
    pub censor: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            top_k: 25,
            censor: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CensorConfig {
    pub cache_capacity: usize,
}

impl Default for CensorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let config = Self {
            trending: TrendingConfig {
                window_hours: env_or("TRENDING_WINDOW_HOURS", defaults.trending.window_hours)?,
            },
            corpus: CorpusConfig {
                min_word_length: env_or("CORPUS_MIN_WORD_LENGTH", defaults.corpus.min_word_length)?,
                top_k: env_or("CORPUS_TOP_K", defaults.corpus.top_k)?,
                censor: env_or("CORPUS_CENSOR", defaults.corpus.censor)?,
            },
            censor: CensorConfig {
                cache_capacity: env_or("CENSOR_CACHE_CAPACITY", defaults.censor.cache_capacity)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.trending.window()?;
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("{} has unparsable value {:?}", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.trending.window_hours, 24);
        assert_eq!(config.corpus.min_word_length, 3);
        assert_eq!(config.corpus.top_k, 25);
        assert!(config.corpus.censor);
        assert_eq!(config.censor.cache_capacity, 1000);
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value::<usize>("CORPUS_TOP_K", " 10 ").unwrap(), 10);
        assert!(!parse_value::<bool>("CORPUS_CENSOR", "false").unwrap());

        let err = parse_value::<i64>("TRENDING_WINDOW_HOURS", "soon").unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("TRENDING_WINDOW_HOURS")));
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(TrendingConfig { window_hours: 0 }.window().unwrap(), TimeDelta::zero());
        assert_eq!(TrendingConfig { window_hours: 6 }.window().unwrap(), TimeDelta::hours(6));
        assert!(matches!(
            TrendingConfig { window_hours: -1 }.window(),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            TrendingConfig { window_hours: i64::MAX }.window(),
            Err(AppError::Configuration(_))
        ));
    }

    // Only test in the crate that touches process environment
    #[test]
    fn test_from_env_rejects_unusable_window() {
        env::set_var("TRENDING_WINDOW_HOURS", i64::MAX.to_string());
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("out of range")));

        env::set_var("TRENDING_WINDOW_HOURS", "-3");
        assert!(Config::from_env().is_err());

        env::set_var("TRENDING_WINDOW_HOURS", "6");
        assert_eq!(Config::from_env().unwrap().trending.window_hours, 6);

        env::remove_var("TRENDING_WINDOW_HOURS");
        assert_eq!(Config::from_env().unwrap().trending.window_hours, 24);
    }
}

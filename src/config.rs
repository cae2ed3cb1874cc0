//! Inbox configuration parsed from environment variables.
//!
//! Every knob is optional; missing or unparsable values fall back to the
//! defaults below. `validate` rejects combinations the timers cannot honor.

use std::time::Duration;

use crate::error::ErrorCode;

pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 1024;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 150;
pub const DEFAULT_SCROLL_SETTLE_MS: u64 = 100;
pub const DEFAULT_FOCUS_DELAY_MS: u64 = 100;
pub const DEFAULT_QUICK_ACTION_DELAY_MS: u64 = 100;
pub const DEFAULT_GENERATION_DELAY_MIN_MS: u64 = 1000;
pub const DEFAULT_GENERATION_DELAY_MAX_MS: u64 = 2000;
pub const DEFAULT_REPLY_DELAY_MIN_MS: u64 = 2000;
pub const DEFAULT_REPLY_DELAY_MAX_MS: u64 = 5000;
pub const DEFAULT_REPLY_PROBABILITY: f64 = 0.3;
pub const DEFAULT_RESPONDER_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RECENT_QUERY_LIMIT: usize = 2;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name}: min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidRange { name: &'static str, min_ms: u64, max_ms: u64 },
    #[error("reply probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
    #[error("mobile breakpoint must be greater than zero")]
    ZeroBreakpoint,
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG_INVALID"
    }
}

/// Inclusive millisecond range a random delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Fixed delay, handy for deterministic tests.
    #[must_use]
    pub const fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    fn validate(self, name: &'static str) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvalidRange { name, min_ms: self.min_ms, max_ms: self.max_ms });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InboxConfig {
    /// Widths strictly below this are treated as mobile.
    pub mobile_breakpoint_px: u32,
    pub resize_debounce: Duration,
    pub scroll_settle: Duration,
    pub focus_delay: Duration,
    pub quick_action_delay: Duration,
    pub generation_delay: DelayRange,
    pub reply_delay: DelayRange,
    pub reply_probability: f64,
    pub responder_timeout: Duration,
    pub recent_query_limit: usize,
    /// Seed for the random source; `None` seeds from the OS.
    pub random_seed: Option<u64>,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            resize_debounce: Duration::from_millis(DEFAULT_RESIZE_DEBOUNCE_MS),
            scroll_settle: Duration::from_millis(DEFAULT_SCROLL_SETTLE_MS),
            focus_delay: Duration::from_millis(DEFAULT_FOCUS_DELAY_MS),
            quick_action_delay: Duration::from_millis(DEFAULT_QUICK_ACTION_DELAY_MS),
            generation_delay: DelayRange::new(DEFAULT_GENERATION_DELAY_MIN_MS, DEFAULT_GENERATION_DELAY_MAX_MS),
            reply_delay: DelayRange::new(DEFAULT_REPLY_DELAY_MIN_MS, DEFAULT_REPLY_DELAY_MAX_MS),
            reply_probability: DEFAULT_REPLY_PROBABILITY,
            responder_timeout: Duration::from_millis(DEFAULT_RESPONDER_TIMEOUT_MS),
            recent_query_limit: DEFAULT_RECENT_QUERY_LIMIT,
            random_seed: None,
        }
    }
}

impl InboxConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `INBOX_MOBILE_BREAKPOINT_PX`: default 1024
    /// - `INBOX_RESIZE_DEBOUNCE_MS`: default 150
    /// - `INBOX_SCROLL_SETTLE_MS`: default 100
    /// - `INBOX_FOCUS_DELAY_MS`: default 100
    /// - `INBOX_QUICK_ACTION_DELAY_MS`: default 100
    /// - `INBOX_GENERATION_DELAY_MIN_MS` / `INBOX_GENERATION_DELAY_MAX_MS`: default 1000 / 2000
    /// - `INBOX_REPLY_DELAY_MIN_MS` / `INBOX_REPLY_DELAY_MAX_MS`: default 2000 / 5000
    /// - `INBOX_REPLY_PROBABILITY`: default 0.3
    /// - `INBOX_RESPONDER_TIMEOUT_MS`: default 30000
    /// - `INBOX_RECENT_QUERY_LIMIT`: default 2
    /// - `INBOX_RANDOM_SEED`: unset by default
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the resulting values fail [`InboxConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            mobile_breakpoint_px: env_parse("INBOX_MOBILE_BREAKPOINT_PX", DEFAULT_MOBILE_BREAKPOINT_PX),
            resize_debounce: env_millis("INBOX_RESIZE_DEBOUNCE_MS", DEFAULT_RESIZE_DEBOUNCE_MS),
            scroll_settle: env_millis("INBOX_SCROLL_SETTLE_MS", DEFAULT_SCROLL_SETTLE_MS),
            focus_delay: env_millis("INBOX_FOCUS_DELAY_MS", DEFAULT_FOCUS_DELAY_MS),
            quick_action_delay: env_millis("INBOX_QUICK_ACTION_DELAY_MS", DEFAULT_QUICK_ACTION_DELAY_MS),
            generation_delay: DelayRange::new(
                env_parse("INBOX_GENERATION_DELAY_MIN_MS", DEFAULT_GENERATION_DELAY_MIN_MS),
                env_parse("INBOX_GENERATION_DELAY_MAX_MS", DEFAULT_GENERATION_DELAY_MAX_MS),
            ),
            reply_delay: DelayRange::new(
                env_parse("INBOX_REPLY_DELAY_MIN_MS", DEFAULT_REPLY_DELAY_MIN_MS),
                env_parse("INBOX_REPLY_DELAY_MAX_MS", DEFAULT_REPLY_DELAY_MAX_MS),
            ),
            reply_probability: env_parse("INBOX_REPLY_PROBABILITY", DEFAULT_REPLY_PROBABILITY),
            responder_timeout: env_millis("INBOX_RESPONDER_TIMEOUT_MS", DEFAULT_RESPONDER_TIMEOUT_MS),
            recent_query_limit: env_parse("INBOX_RECENT_QUERY_LIMIT", DEFAULT_RECENT_QUERY_LIMIT),
            random_seed: std::env::var("INBOX_RANDOM_SEED")
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the timers cannot honor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] on an inverted delay range, a probability
    /// outside `[0, 1]`, or a zero breakpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mobile_breakpoint_px == 0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        if !(0.0..=1.0).contains(&self.reply_probability) {
            return Err(ConfigError::InvalidProbability(self.reply_probability));
        }
        self.generation_delay.validate("generation_delay")?;
        self.reply_delay.validate("reply_delay")?;
        Ok(())
    }
}

/// Parse `key` from the environment, falling back to `default` when unset or malformed.
#[must_use]
pub fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_millis(key: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_parse(key, default_ms))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

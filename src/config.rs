use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{Clock, ConsoleError, Result, SystemClock};

pub const LATENCY_SCALE_ENV: &str = "SUPPORT_CONSOLE_LATENCY_SCALE";
pub const FIXTURES_ENV: &str = "SUPPORT_CONSOLE_FIXTURES";

/// Largest accepted latency multiplier.
pub const MAX_LATENCY_SCALE: f64 = 1_000.0;

/// Simulated round-trip delay for each service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub search: Duration,
}

impl LatencyProfile {
    pub fn users() -> Self {
        Self {
            list: Duration::from_millis(300),
            get: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(350),
            delete: Duration::from_millis(250),
            search: Duration::from_millis(300),
        }
    }

    pub fn apps() -> Self {
        Self::users()
    }

    pub fn ai_logs() -> Self {
        Self {
            list: Duration::from_millis(400),
            get: Duration::from_millis(200),
            create: Duration::from_millis(300),
            update: Duration::from_millis(350),
            delete: Duration::from_millis(250),
            search: Duration::from_millis(400),
        }
    }

    /// Zero delays. Operations still suspend once before resolving.
    pub fn instant() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            search: Duration::ZERO,
        }
    }

    /// Multiply every delay. Products past `Duration::MAX` saturate.
    pub fn scaled(self, factor: f64) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            list: scale(self.list),
            get: scale(self.get),
            create: scale(self.create),
            update: scale(self.update),
            delete: scale(self.delete),
            search: scale(self.search),
        }
    }
}

/// Console configuration
///
/// Builder-style; `from_env` layers environment overrides on the defaults.
#[derive(Clone)]
pub struct ConsoleConfig {
    /// Delays for the user service
    pub user_latency: LatencyProfile,

    /// Delays for the app service
    pub app_latency: LatencyProfile,

    /// Delays for the AI log service
    pub ai_log_latency: LatencyProfile,

    /// Directory to load fixtures from instead of the bundled set
    pub fixtures_dir: Option<PathBuf>,

    /// Start with empty collections, ignoring every fixture source
    pub empty_store: bool,

    /// Source of creation timestamps
    pub clock: Arc<dyn Clock>,
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self {
            user_latency: LatencyProfile::users(),
            app_latency: LatencyProfile::apps(),
            ai_log_latency: LatencyProfile::ai_logs(),
            fixtures_dir: None,
            empty_store: false,
            clock: Arc::new(SystemClock),
        }
    }

    /// Defaults with every delay at zero; what tests run with.
    pub fn instant() -> Self {
        Self::new().latency_scale(0.0)
    }

    /// Read overrides from the environment.
    ///
    /// - `SUPPORT_CONSOLE_LATENCY_SCALE`: non-negative float multiplier
    /// - `SUPPORT_CONSOLE_FIXTURES`: fixture directory
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(raw) = env::var(LATENCY_SCALE_ENV) {
            config = config.latency_scale(parse_scale(&raw)?);
        }

        if let Ok(dir) = env::var(FIXTURES_ENV)
            && !dir.trim().is_empty()
        {
            config = config.fixtures_dir(dir);
        }

        Ok(config)
    }

    /// Multiply every delay of every service.
    pub fn latency_scale(mut self, factor: f64) -> Self {
        self.user_latency = self.user_latency.scaled(factor);
        self.app_latency = self.app_latency.scaled(factor);
        self.ai_log_latency = self.ai_log_latency.scaled(factor);
        self
    }

    pub fn user_latency(mut self, profile: LatencyProfile) -> Self {
        self.user_latency = profile;
        self
    }

    pub fn app_latency(mut self, profile: LatencyProfile) -> Self {
        self.app_latency = profile;
        self
    }

    pub fn ai_log_latency(mut self, profile: LatencyProfile) -> Self {
        self.ai_log_latency = profile;
        self
    }

    pub fn fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = Some(dir.into());
        self
    }

    pub fn empty_store(mut self) -> Self {
        self.empty_store = true;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("user_latency", &self.user_latency)
            .field("app_latency", &self.app_latency)
            .field("ai_log_latency", &self.ai_log_latency)
            .field("fixtures_dir", &self.fixtures_dir)
            .field("empty_store", &self.empty_store)
            .finish_non_exhaustive()
    }
}

pub fn parse_scale(raw: &str) -> Result<f64> {
    let factor: f64 = raw.trim().parse().map_err(|_| {
        ConsoleError::Config(format!("{LATENCY_SCALE_ENV} must be a number, got '{raw}'"))
    })?;
    if !(0.0..=MAX_LATENCY_SCALE).contains(&factor) {
        return Err(ConsoleError::Config(format!(
            "{LATENCY_SCALE_ENV} must be between 0 and {MAX_LATENCY_SCALE}, got '{raw}'"
        )));
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let config = ConsoleConfig::new();
        assert_eq!(config.user_latency.list, Duration::from_millis(300));
        assert_eq!(config.user_latency.create, Duration::from_millis(400));
        assert_eq!(config.ai_log_latency.list, Duration::from_millis(400));
        assert_eq!(config.ai_log_latency.create, Duration::from_millis(300));
        assert!(config.fixtures_dir.is_none());
    }

    #[test]
    fn test_scaling() {
        let half = LatencyProfile::users().scaled(0.5);
        assert!((half.update.as_secs_f64() - 0.175).abs() < 1e-6);
        assert_eq!(ConsoleConfig::instant().app_latency, LatencyProfile::instant());
        assert_eq!(LatencyProfile::users().scaled(-3.0), LatencyProfile::instant());
    }

    #[test]
    fn test_parse_scale() {
        assert_eq!(parse_scale(" 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_scale("0").unwrap(), 0.0);
        assert!(matches!(parse_scale("fast"), Err(ConsoleError::Config(_))));
        assert!(matches!(parse_scale("-1"), Err(ConsoleError::Config(_))));
        assert!(matches!(parse_scale("inf"), Err(ConsoleError::Config(_))));
        assert!(matches!(parse_scale("NaN"), Err(ConsoleError::Config(_))));
        assert_eq!(parse_scale("1000").unwrap(), MAX_LATENCY_SCALE);
    }

    #[test]
    fn test_out_of_range_scale_is_rejected() {
        let err = parse_scale("1e20").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(ref msg) if msg.contains(LATENCY_SCALE_ENV)));
        assert!(parse_scale("1000.5").is_err());
    }

    #[test]
    fn test_huge_factor_saturates() {
        let profile = LatencyProfile::users().scaled(1e20);
        assert_eq!(profile.list, Duration::MAX);
        assert_eq!(profile.search, Duration::MAX);

        let config = ConsoleConfig::new().latency_scale(1e20);
        assert_eq!(config.ai_log_latency.get, Duration::MAX);
    }
}

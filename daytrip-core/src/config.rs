//! Routing configuration: travel mode, engine selection and daily budget.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default daily travel budget in hours.
pub const DEFAULT_DAILY_BUDGET_HOURS: f64 = 5.0;

/// Means of travel between stops.
///
/// The enum is closed: an unknown mode is unrepresentable, so estimators
/// need no fallback speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TravelMode {
    /// Travel by car.
    Drive,
    /// Travel by bicycle.
    Cycle,
    /// Travel on foot.
    Walk,
}

impl TravelMode {
    /// Assumed average speed for straight-line duration estimates.
    pub const fn speed_kmh(self) -> f64 {
        match self {
            Self::Drive => 70.0,
            Self::Cycle => 18.0,
            Self::Walk => 5.0,
        }
    }

    /// Canonical lowercase name, matching [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drive => "drive",
            Self::Cycle => "cycle",
            Self::Walk => "walk",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`TravelMode`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode '{0}' (expected drive, cycle or walk)")]
pub struct ParseTravelModeError(String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drive" => Ok(Self::Drive),
            "cycle" => Ok(Self::Cycle),
            "walk" => Ok(Self::Walk),
            other => Err(ParseTravelModeError(other.to_owned())),
        }
    }
}

/// Which leg-metrics strategy a recompute should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Engine {
    /// Ask the remote matrix service first, fall back to the local estimate.
    Remote,
    /// Never consult the remote service.
    Local,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Local => "local",
        })
    }
}

/// Error parsing an [`Engine`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown engine '{0}' (expected remote or local)")]
pub struct ParseEngineError(String);

impl FromStr for Engine {
    type Err = ParseEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(ParseEngineError(other.to_owned())),
        }
    }
}

/// Validated routing parameters for a planning session.
///
/// # Examples
/// ```
/// use daytrip_core::{Engine, RoutingConfig, TravelMode};
///
/// let config = RoutingConfig::new(TravelMode::Drive, Engine::Local, 5.0)?;
/// assert_eq!(config.daily_budget_hours, 5.0);
/// # Ok::<(), daytrip_core::RoutingConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Means of travel between stops.
    pub mode: TravelMode,
    /// Preferred leg-metrics strategy.
    pub engine: Engine,
    /// Target travel hours per day; day buckets close near this budget.
    pub daily_budget_hours: f64,
}

/// Errors returned by [`RoutingConfig::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingConfigError {
    /// The daily budget was zero, negative or not a number.
    #[error("daily budget must be a positive number of hours, got {0}")]
    NonPositiveBudget(f64),
}

impl RoutingConfig {
    /// Validate and construct a configuration.
    pub fn new(
        mode: TravelMode,
        engine: Engine,
        daily_budget_hours: f64,
    ) -> Result<Self, RoutingConfigError> {
        if !(daily_budget_hours > 0.0) {
            return Err(RoutingConfigError::NonPositiveBudget(daily_budget_hours));
        }
        Ok(Self {
            mode,
            engine,
            daily_budget_hours,
        })
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: TravelMode::Drive,
            engine: Engine::Remote,
            daily_budget_hours: DEFAULT_DAILY_BUDGET_HOURS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TravelMode::Drive, 70.0)]
    #[case(TravelMode::Cycle, 18.0)]
    #[case(TravelMode::Walk, 5.0)]
    fn mode_speeds(#[case] mode: TravelMode, #[case] expected: f64) {
        assert_eq!(mode.speed_kmh(), expected);
    }

    #[rstest]
    #[case("drive", TravelMode::Drive)]
    #[case("cycle", TravelMode::Cycle)]
    #[case("walk", TravelMode::Walk)]
    fn mode_round_trips_through_str(#[case] text: &str, #[case] mode: TravelMode) {
        assert_eq!(text.parse::<TravelMode>(), Ok(mode));
        assert_eq!(mode.to_string(), text);
    }

    #[rstest]
    fn mode_rejects_unknown_text() {
        assert!("hovercraft".parse::<TravelMode>().is_err());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn config_rejects_non_positive_budget(#[case] hours: f64) {
        let result = RoutingConfig::new(TravelMode::Drive, Engine::Local, hours);
        assert!(matches!(
            result,
            Err(RoutingConfigError::NonPositiveBudget(_))
        ));
    }

    #[rstest]
    fn config_accepts_positive_budget() {
        let config = RoutingConfig::new(TravelMode::Walk, Engine::Remote, 2.5)
            .expect("positive budget should validate");
        assert_eq!(config.mode, TravelMode::Walk);
        assert_eq!(config.engine, Engine::Remote);
    }
}

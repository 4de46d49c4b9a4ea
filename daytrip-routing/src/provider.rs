//! HTTP leg-metrics provider using OSRM's Table API.

use std::time::Duration;

use async_trait::async_trait;
use daytrip_core::{LegMetric, LegMetricsError, LegMetricsProvider, Stop, TravelMode};
use reqwest::Client;
use thiserror::Error;

use crate::osrm::TableResponse;

/// Error type for [`OsrmTableProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "daytrip-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmTableProvider`].
#[derive(Debug, Clone)]
pub struct OsrmTableProviderConfig {
    /// Base URL for the OSRM service (e.g. `"https://router.project-osrm.org"`).
    pub base_url: String,
    /// Request timeout; exceeding it counts as provider failure.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmTableProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmTableProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Leg-metrics provider backed by the OSRM Table API.
///
/// Issues one request per computation, asking for the full pairwise
/// distance/duration matrix over the ordered coordinate list, and consumes
/// only the superdiagonal entries `(i, i + 1)` as consecutive-leg metrics.
#[derive(Debug)]
pub struct OsrmTableProvider {
    client: Client,
    config: OsrmTableProviderConfig,
}

impl OsrmTableProvider {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmTableProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: OsrmTableProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Build the Table API URL for the given stops and mode.
    ///
    /// The URL format is `{base_url}/table/v1/{profile}/{coordinates}` with
    /// semicolon-separated `lon,lat` pairs and both annotations requested.
    fn table_url(&self, stops: &[Stop], mode: TravelMode) -> String {
        let coords: String = stops
            .iter()
            .map(|stop| format!("{},{}", stop.location.x, stop.location.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance,duration",
            self.config.base_url.trim_end_matches('/'),
            osrm_profile(mode),
            coords
        )
    }

    async fn fetch_legs(
        &self,
        stops: &[Stop],
        mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError> {
        let url = self.table_url(stops, mode);
        log::debug!("requesting OSRM table for {} stops: {url}", stops.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let table: TableResponse =
            response
                .json()
                .await
                .map_err(|err| LegMetricsError::Malformed {
                    message: err.to_string(),
                })?;

        convert_response(table, stops.len()).inspect_err(|err| {
            log::warn!("rejecting OSRM table response from {url}: {err}");
        })
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> LegMetricsError {
        if error.is_timeout() {
            return LegMetricsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return LegMetricsError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        LegMetricsError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Map a travel mode to the OSRM routing profile path segment.
fn osrm_profile(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Drive => "driving",
        TravelMode::Cycle => "cycling",
        TravelMode::Walk => "walking",
    }
}

/// Validate a table response for `n` stops and extract the superdiagonal.
///
/// The whole response is rejected on any defect; partial results are never
/// returned.
fn convert_response(response: TableResponse, n: usize) -> Result<Vec<LegMetric>, LegMetricsError> {
    if !response.is_ok() {
        return Err(LegMetricsError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let durations = response
        .durations
        .ok_or_else(|| missing_field("durations"))?;
    let distances = response
        .distances
        .ok_or_else(|| missing_field("distances"))?;
    check_dimensions(&durations, n, "durations")?;
    check_dimensions(&distances, n, "distances")?;

    (0..n - 1)
        .map(|i| {
            let metres = superdiagonal_cell(&distances, i, "distances")?;
            let seconds = superdiagonal_cell(&durations, i, "durations")?;
            Ok(LegMetric {
                distance_km: metres / 1000.0,
                duration_hours: seconds / 3600.0,
            })
        })
        .collect()
}

fn missing_field(name: &str) -> LegMetricsError {
    LegMetricsError::Malformed {
        message: format!("response is missing the {name} matrix"),
    }
}

fn check_dimensions(
    matrix: &[Vec<Option<f64>>],
    n: usize,
    name: &str,
) -> Result<(), LegMetricsError> {
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(LegMetricsError::Malformed {
            message: format!("{name} matrix is not {n}x{n}"),
        });
    }
    Ok(())
}

/// Read cell `(i, i + 1)`, rejecting unreachable or nonsensical values.
fn superdiagonal_cell(
    matrix: &[Vec<Option<f64>>],
    i: usize,
    name: &str,
) -> Result<f64, LegMetricsError> {
    matrix[i][i + 1]
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| LegMetricsError::Malformed {
            message: format!("{name} matrix has no usable value for leg {i}"),
        })
}

#[async_trait]
impl LegMetricsProvider for OsrmTableProvider {
    async fn compute_legs(
        &self,
        stops: &[Stop],
        mode: TravelMode,
    ) -> Result<Vec<LegMetric>, LegMetricsError> {
        if stops.len() < 2 {
            return Err(LegMetricsError::NotEnoughStops);
        }
        self.fetch_legs(stops, mode).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn sample_stops() -> Vec<Stop> {
        vec![
            Stop::new("a", "A", Coord { x: -0.1, y: 51.5 }),
            Stop::new("b", "B", Coord { x: -0.2, y: 51.6 }),
        ]
    }

    fn ok_response(durations: Vec<Vec<Option<f64>>>, distances: Vec<Vec<Option<f64>>>) -> TableResponse {
        TableResponse {
            code: "Ok".to_owned(),
            message: None,
            durations: Some(durations),
            distances: Some(distances),
        }
    }

    #[rstest]
    #[case(TravelMode::Drive, "driving")]
    #[case(TravelMode::Cycle, "cycling")]
    #[case(TravelMode::Walk, "walking")]
    fn table_url_selects_profile_per_mode(
        sample_stops: Vec<Stop>,
        #[case] mode: TravelMode,
        #[case] profile: &str,
    ) {
        let provider =
            OsrmTableProvider::new("http://osrm.example.com").expect("provider should build");

        let url = provider.table_url(&sample_stops, mode);

        assert_eq!(
            url,
            format!(
                "http://osrm.example.com/table/v1/{profile}/-0.1,51.5;-0.2,51.6?annotations=distance,duration"
            )
        );
    }

    #[rstest]
    fn table_url_strips_trailing_slash(sample_stops: Vec<Stop>) {
        let provider =
            OsrmTableProvider::new("http://osrm.example.com/").expect("provider should build");

        let url = provider.table_url(&sample_stops, TravelMode::Drive);

        assert!(url.starts_with("http://osrm.example.com/table/"));
        assert!(!url.contains("//table"));
    }

    #[rstest]
    fn convert_response_extracts_the_superdiagonal() {
        let response = ok_response(
            vec![
                vec![Some(0.0), Some(3600.0), Some(9999.0)],
                vec![Some(3600.0), Some(0.0), Some(7200.0)],
                vec![Some(9999.0), Some(7200.0), Some(0.0)],
            ],
            vec![
                vec![Some(0.0), Some(70_000.0), Some(9999.0)],
                vec![Some(70_000.0), Some(0.0), Some(140_000.0)],
                vec![Some(9999.0), Some(140_000.0), Some(0.0)],
            ],
        );

        let legs = convert_response(response, 3).expect("should parse");

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].distance_km, 70.0);
        assert_eq!(legs[0].duration_hours, 1.0);
        assert_eq!(legs[1].distance_km, 140.0);
        assert_eq!(legs[1].duration_hours, 2.0);
    }

    #[rstest]
    fn convert_response_ignores_nulls_off_the_superdiagonal() {
        let response = ok_response(
            vec![
                vec![Some(0.0), Some(60.0), None],
                vec![None, Some(0.0), Some(60.0)],
                vec![None, None, Some(0.0)],
            ],
            vec![
                vec![Some(0.0), Some(1000.0), None],
                vec![None, Some(0.0), Some(1000.0)],
                vec![None, None, Some(0.0)],
            ],
        );

        assert!(convert_response(response, 3).is_ok());
    }

    #[rstest]
    fn convert_response_rejects_null_superdiagonal_cell() {
        let response = ok_response(
            vec![vec![Some(0.0), None], vec![Some(60.0), Some(0.0)]],
            vec![vec![Some(0.0), Some(1000.0)], vec![Some(1000.0), Some(0.0)]],
        );

        let err = convert_response(response, 2).expect_err("should fail");
        assert!(matches!(err, LegMetricsError::Malformed { .. }));
    }

    #[rstest]
    #[case(Some(-1.0))]
    #[case(Some(f64::NAN))]
    #[case(Some(f64::INFINITY))]
    fn convert_response_rejects_nonsensical_cells(#[case] cell: Option<f64>) {
        let response = ok_response(
            vec![vec![Some(0.0), cell], vec![Some(60.0), Some(0.0)]],
            vec![vec![Some(0.0), Some(1000.0)], vec![Some(1000.0), Some(0.0)]],
        );

        let err = convert_response(response, 2).expect_err("should fail");
        assert!(matches!(err, LegMetricsError::Malformed { .. }));
    }

    #[rstest]
    fn convert_response_rejects_wrong_dimensions() {
        let response = ok_response(
            vec![vec![Some(0.0), Some(60.0)]],
            vec![vec![Some(0.0), Some(1000.0)], vec![Some(1000.0), Some(0.0)]],
        );

        let err = convert_response(response, 2).expect_err("should fail");
        assert!(matches!(err, LegMetricsError::Malformed { .. }));
    }

    #[rstest]
    fn convert_response_rejects_missing_distances() {
        let response = TableResponse {
            code: "Ok".to_owned(),
            message: None,
            durations: Some(vec![vec![Some(0.0), Some(60.0)], vec![Some(60.0), Some(0.0)]]),
            distances: None,
        };

        let err = convert_response(response, 2).expect_err("should fail");
        assert!(matches!(err, LegMetricsError::Malformed { .. }));
    }

    #[rstest]
    fn convert_response_surfaces_service_errors() {
        let response = TableResponse {
            code: "NoTable".to_owned(),
            message: Some("Too many coordinates".to_owned()),
            durations: None,
            distances: None,
        };

        let err = convert_response(response, 2).expect_err("should fail");
        match err {
            LegMetricsError::Service { code, message } => {
                assert_eq!(code, "NoTable");
                assert_eq!(message, "Too many coordinates");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn single_stop_is_rejected_before_any_request() {
        let provider =
            OsrmTableProvider::new("http://osrm.invalid").expect("provider should build");
        let stops = vec![Stop::new("a", "A", Coord { x: 0.0, y: 0.0 })];

        let err = provider
            .compute_legs(&stops, TravelMode::Drive)
            .await
            .expect_err("should fail");

        assert_eq!(err, LegMetricsError::NotEnoughStops);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_service_is_a_provider_error(sample_stops: Vec<Stop>) {
        // Nothing listens on port 1; the request fails without leaving the
        // host and the error is recoverable, not a panic.
        let config = OsrmTableProviderConfig::new("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(1));
        let provider = OsrmTableProvider::with_config(config).expect("provider should build");

        let err = provider
            .compute_legs(&sample_stops, TravelMode::Drive)
            .await
            .expect_err("should fail");

        assert!(matches!(
            err,
            LegMetricsError::Network { .. } | LegMetricsError::Timeout { .. }
        ));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = OsrmTableProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}

//! HTTP-based `DirectionsProvider` using an OSRM-compatible route service.
//!
//! The [`DirectionsProvider`] trait is synchronous so the planner stays
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use wayfarer_data::routing::HttpDirectionsProvider;
//! use wayfarer_core::{Coordinate, DirectionsProvider, DirectionsQuery};
//!
//! let provider = HttpDirectionsProvider::new("http://localhost:5000")?;
//! let query = DirectionsQuery {
//!     origin: Coordinate::new(10.7769, 106.7009),
//!     destination: Coordinate::new(10.8010, 106.6650),
//!     waypoints: Vec::new(),
//! };
//!
//! let directions = provider.get_directions(&query)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use wayfarer_core::{Directions, DirectionsError, DirectionsProvider, DirectionsQuery};

use super::wire::DirectionsResponse;

/// Error type for [`HttpDirectionsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The configured base URL does not parse.
    #[error("invalid directions base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "wayfarer-routing/0.1";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fixed route service options: full GeoJSON geometry, no ferries.
const ROUTE_OPTIONS: [(&str, &str); 4] = [
    ("steps", "true"),
    ("overview", "full"),
    ("geometries", "geojson"),
    ("exclude", "ferry"),
];

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Base URL for the route service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Access key sent as the `api_key` query parameter, if the service
    /// requires one.
    pub api_key: Option<String>,
    /// Routing profile path segment.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpDirectionsProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            api_key: None,
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the access key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
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

/// HTTP-based directions provider.
///
/// The provider owns a Tokio runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within a multi-threaded Tokio runtime it
/// uses that runtime's handle with [`tokio::task::block_in_place`]. Inside a
/// `current_thread` runtime it falls back to its own runtime, which may
/// deadlock if the caller's runtime drives I/O this request depends on.
pub struct HttpDirectionsProvider {
    client: Client,
    config: HttpDirectionsProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpDirectionsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDirectionsProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Provider configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsProviderConfig {
        &self.config
    }

    /// Build the route URL for `query`, without query parameters.
    ///
    /// The URL format is: `{base_url}/route/v1/{profile}/{coordinates}`
    /// where coordinates are semicolon-separated `lon,lat` pairs.
    fn build_route_url(&self, query: &DirectionsQuery) -> String {
        let coords = query
            .points()
            .map(wayfarer_core::Coordinate::to_lon_lat_string)
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    /// Prepare the GET request for `url` with the route options and, when
    /// configured, the access key.
    fn build_request(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url).query(&ROUTE_OPTIONS);
        match &self.config.api_key {
            Some(key) => request.query(&[("api_key", key)]),
            None => request,
        }
    }

    /// Fetch the route asynchronously.
    async fn fetch_directions_async(
        &self,
        query: &DirectionsQuery,
    ) -> Result<Directions, DirectionsError> {
        let url = self.build_route_url(query);
        log::debug!("requesting directions from {url}");

        let response = self
            .build_request(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &url))?;

        let body: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        convert_response(body)
    }

    /// Convert a reqwest error to a `DirectionsError`.
    ///
    /// `url` excludes query parameters, so the access key never leaks into
    /// the error.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        match status {
            Some(status) => DirectionsError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            },
            None => DirectionsError::NetworkError {
                url: url.to_owned(),
                message,
            },
        }
    }
}

/// Convert a route service response to [`Directions`].
fn convert_response(response: DirectionsResponse) -> Result<Directions, DirectionsError> {
    if !response.is_ok() {
        return Err(DirectionsError::ServiceError {
            code: response.code.unwrap_or_default(),
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::EmptyResponse)?;

    if !(route.distance.is_finite() && route.duration.is_finite())
        || route.distance < 0.0
        || route.duration < 0.0
    {
        return Err(DirectionsError::ParseError {
            message: format!(
                "invalid route totals: distance {} m, duration {} s",
                route.distance, route.duration
            ),
        });
    }

    let geometry = route.geometry.to_coordinates();
    if geometry.len() < 2 {
        return Err(DirectionsError::EmptyResponse);
    }

    Ok(Directions {
        distance_m: route.distance,
        duration_s: route.duration,
        geometry,
    })
}

impl DirectionsProvider for HttpDirectionsProvider {
    /// Fetch the route for `query`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`); see the type-level docs.
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        if !query.is_valid() {
            return Err(DirectionsError::InvalidInput);
        }

        let future = self.fetch_directions_async(query);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::wire::{WireGeometry, WireRoute};
    use rstest::{fixture, rstest};
    use wayfarer_core::Coordinate;

    #[fixture]
    fn sample_query() -> DirectionsQuery {
        DirectionsQuery {
            origin: Coordinate::new(10.77, 106.70),
            destination: Coordinate::new(10.80, 106.66),
            waypoints: vec![Coordinate::new(10.78, 106.69)],
        }
    }

    fn response(code: Option<&str>, routes: Vec<WireRoute>) -> DirectionsResponse {
        DirectionsResponse {
            code: code.map(str::to_owned),
            message: None,
            routes,
        }
    }

    fn route(distance: f64, duration: f64, coordinates: Vec<[f64; 2]>) -> WireRoute {
        WireRoute {
            distance,
            duration,
            geometry: WireGeometry { coordinates },
        }
    }

    #[rstest]
    fn build_route_url_formats_coordinates(sample_query: DirectionsQuery) {
        let provider =
            HttpDirectionsProvider::new("http://osrm.example.com").expect("provider should build");

        let url = provider.build_route_url(&sample_query);

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/106.7,10.77;106.69,10.78;106.66,10.8"
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash_and_uses_profile(sample_query: DirectionsQuery) {
        let config = HttpDirectionsProviderConfig::new("http://osrm.example.com/")
            .with_profile("car")
            .with_api_key("secret");
        let provider = HttpDirectionsProvider::with_config(config).expect("provider should build");

        let url = provider.build_route_url(&sample_query);

        assert!(url.starts_with("http://osrm.example.com/route/v1/car/"));
        assert!(!url.contains("//route"));
        assert!(!url.contains("secret"));
    }

    #[rstest]
    fn build_request_carries_route_options_and_key(sample_query: DirectionsQuery) {
        let config = HttpDirectionsProviderConfig::new("http://osrm.example.com")
            .with_api_key("k-123");
        let provider = HttpDirectionsProvider::with_config(config).expect("provider should build");
        let url = provider.build_route_url(&sample_query);

        let request = provider
            .build_request(&url)
            .build()
            .expect("request should build");

        let query = request.url().query().expect("query string present");
        for pair in [
            "steps=true",
            "overview=full",
            "geometries=geojson",
            "exclude=ferry",
            "api_key=k-123",
        ] {
            assert!(query.contains(pair), "missing {pair} in {query}");
        }
        assert!(request.url().path().starts_with("/route/v1/driving/"));
    }

    #[rstest]
    fn build_request_omits_key_when_unset(sample_query: DirectionsQuery) {
        let provider =
            HttpDirectionsProvider::new("http://osrm.example.com").expect("provider should build");
        let url = provider.build_route_url(&sample_query);

        let request = provider
            .build_request(&url)
            .build()
            .expect("request should build");

        let query = request.url().query().expect("query string present");
        assert!(query.contains("steps=true"));
        assert!(!query.contains("api_key"));
    }

    #[rstest]
    fn network_error_url_omits_key(sample_query: DirectionsQuery) {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");
        drop(listener);
        let config = HttpDirectionsProviderConfig::new(format!("http://{addr}"))
            .with_api_key("k-123")
            .with_timeout(Duration::from_secs(2));
        let provider = HttpDirectionsProvider::with_config(config).expect("provider should build");

        let err = provider
            .get_directions(&sample_query)
            .expect_err("closed port should fail");

        match &err {
            DirectionsError::NetworkError { url, message } => {
                assert!(url.starts_with(&format!("http://{addr}/route/v1/")));
                assert!(!url.contains("k-123"), "{url}");
                assert!(!message.contains("k-123"), "{message}");
            }
            DirectionsError::Timeout { url, .. } => assert!(!url.contains("k-123"), "{url}"),
            other => panic!("expected a transport failure, found {other:?}"),
        }
        assert!(!err.to_string().contains("k-123"));
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = HttpDirectionsProvider::new("not a url").expect_err("should fail");
        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let config = HttpDirectionsProviderConfig::new("http://localhost:5000").with_api_key("k-123");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("k-123"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn convert_response_handles_success() {
        let body = response(
            Some("Ok"),
            vec![route(12_345.6, 1_800.0, vec![[106.70, 10.77], [106.66, 10.80]])],
        );

        let directions = convert_response(body).expect("should convert");

        assert_eq!(directions.distance_m, 12_345.6);
        assert_eq!(directions.duration_s, 1_800.0);
        assert_eq!(directions.geometry.first(), Some(&Coordinate::new(10.77, 106.70)));
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let body = DirectionsResponse {
            code: Some("NoRoute".to_owned()),
            message: Some("Impossible route".to_owned()),
            routes: Vec::new(),
        };

        let err = convert_response(body).expect_err("should fail");

        assert_eq!(
            err,
            DirectionsError::ServiceError {
                code: "NoRoute".to_owned(),
                message: "Impossible route".to_owned(),
            }
        );
    }

    #[rstest]
    #[case::no_routes(response(Some("Ok"), Vec::new()))]
    #[case::single_point(response(Some("Ok"), vec![route(1.0, 1.0, vec![[106.7, 10.7]])]))]
    fn convert_response_rejects_unusable_routes(#[case] body: DirectionsResponse) {
        assert_eq!(convert_response(body), Err(DirectionsError::EmptyResponse));
    }

    #[rstest]
    #[case::nan_distance(f64::NAN, 10.0)]
    #[case::infinite_duration(10.0, f64::INFINITY)]
    #[case::negative_distance(-1.0, 10.0)]
    fn convert_response_rejects_invalid_totals(#[case] distance: f64, #[case] duration: f64) {
        let body = response(
            None,
            vec![route(distance, duration, vec![[106.70, 10.77], [106.66, 10.80]])],
        );
        assert!(matches!(
            convert_response(body),
            Err(DirectionsError::ParseError { .. })
        ));
    }

    #[rstest]
    fn invalid_query_is_rejected_before_sending(mut sample_query: DirectionsQuery) {
        let provider =
            HttpDirectionsProvider::new("http://localhost:5000").expect("provider should build");
        sample_query.origin = Coordinate::new(f64::NAN, 0.0);

        let err = provider.get_directions(&sample_query).expect_err("should fail");

        assert_eq!(err, DirectionsError::InvalidInput);
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpDirectionsProviderConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.api_key, None);
        assert_eq!(config.profile, DEFAULT_PROFILE);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}

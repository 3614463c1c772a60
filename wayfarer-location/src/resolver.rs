//! `LocationResolver`: cached, cancellable device-position lookup.
//!
//! A resolution runs these steps, checking for cancellation after every
//! suspension point:
//!
//! 1. serve a fresh cache entry unless a refresh is forced;
//! 2. check permission, asking once when it is undetermined;
//! 3. check that location services are enabled;
//! 4. reuse a recent last-known fix unless a refresh is forced;
//! 5. otherwise try each accuracy tier in order, each raced against its
//!    timeout, stopping at the first fix;
//! 6. reverse geocode, substituting a placeholder on failure;
//! 7. cache and publish the result.
//!
//! Only one attempt per resolver is live. Starting a new one cancels the
//! previous attempt's token and bumps a generation counter; a completion
//! whose generation is stale is discarded without touching the cache or the
//! published status.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::time::{Instant, timeout};
use tokio_util::sync::CancellationToken;
use wayfarer_core::Coordinate;

use crate::cache::LocationCache;
use crate::{
    FixOrigin, LocationError, LocationResolverConfig, LocationResult, PermissionStatus,
    PositionFix, PositioningError, PositioningService,
};

/// Latest observable state of a [`LocationResolver`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResolverStatus {
    /// Nothing has been resolved yet.
    #[default]
    Idle,
    /// An attempt is in flight.
    Loading,
    /// The most recent attempt produced a location.
    Ready(LocationResult),
    /// The most recent attempt failed.
    Failed(LocationError),
}

#[derive(Debug, Default)]
struct ResolverState {
    cache: LocationCache,
    generation: u64,
    in_flight: Option<CancellationToken>,
    settled: ResolverStatus,
}

/// Resolves the device position through a [`PositioningService`].
///
/// # Examples
/// ```no_run
/// use wayfarer_location::{LocationResolver, LocationResolverConfig, PositioningService};
///
/// async fn show_position<P: PositioningService>(service: P) {
///     let resolver = LocationResolver::new(service, LocationResolverConfig::default());
///     match resolver.resolve(false).await {
///         Ok(location) => println!("{}", location.resolved_address),
///         Err(error) => println!("{}", error.guidance().unwrap_or_default()),
///     }
/// }
/// ```
pub struct LocationResolver<P> {
    service: P,
    config: LocationResolverConfig,
    state: Mutex<ResolverState>,
    lifetime: CancellationToken,
    status: watch::Sender<ResolverStatus>,
}

impl<P> std::fmt::Debug for LocationResolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationResolver")
            .field("config", &self.config)
            .field("status", &*self.status.borrow())
            .field("torn_down", &self.lifetime.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl<P> LocationResolver<P>
where
    P: PositioningService,
{
    /// Create a resolver over `service`.
    #[must_use]
    pub fn new(service: P, config: LocationResolverConfig) -> Self {
        let (status, _) = watch::channel(ResolverStatus::Idle);
        Self {
            service,
            config,
            state: Mutex::new(ResolverState::default()),
            lifetime: CancellationToken::new(),
            status,
        }
    }

    /// Resolver configuration.
    #[must_use]
    pub const fn config(&self) -> &LocationResolverConfig {
        &self.config
    }

    /// The wrapped positioning service.
    #[must_use]
    pub const fn service(&self) -> &P {
        &self.service
    }

    /// Watch the resolver's published status.
    ///
    /// Cache hits and cancelled attempts publish nothing. An attempt whose
    /// future is dropped restores the last settled status.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResolverStatus> {
        self.status.subscribe()
    }

    /// Resolve the device position.
    ///
    /// With `force_refresh` set, both the cache and the last-known fast path
    /// are bypassed.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::PermissionDenied`],
    /// [`LocationError::ServiceDisabled`] or
    /// [`LocationError::PositionUnavailable`] for user-facing failures, and
    /// [`LocationError::Cancelled`] when a newer call superseded this one or
    /// the resolver was torn down.
    pub async fn resolve(&self, force_refresh: bool) -> Result<LocationResult, LocationError> {
        let (generation, token) = {
            let mut state = self.state.lock().await;
            if !force_refresh {
                if let Some(hit) = state.cache.fresh(Instant::now()) {
                    log::debug!("serving cached location");
                    return Ok(hit.clone());
                }
            }
            if self.lifetime.is_cancelled() {
                return Err(LocationError::Cancelled);
            }
            if let Some(previous) = state.in_flight.take() {
                previous.cancel();
            }
            state.generation = state.generation.wrapping_add(1);
            let token = self.lifetime.child_token();
            state.in_flight = Some(token.clone());
            self.status.send_replace(ResolverStatus::Loading);
            (state.generation, token)
        };

        let guard = AttemptGuard {
            resolver: self,
            generation,
            token: token.clone(),
            settled: false,
        };
        let outcome = self.attempt(force_refresh, &token).await;
        let result = self.complete(generation, &token, outcome).await;
        guard.disarm();
        result
    }

    /// Cancel any in-flight attempt and clear the cache.
    ///
    /// Later calls to [`Self::resolve`] return [`LocationError::Cancelled`].
    pub async fn teardown(&self) {
        self.lifetime.cancel();
        let mut state = self.state.lock().await;
        state.in_flight = None;
        state.cache.clear();
    }

    async fn attempt(
        &self,
        force_refresh: bool,
        token: &CancellationToken,
    ) -> Result<LocationResult, LocationError> {
        self.ensure_permission(token).await?;
        let query = self.config.query_timeout;
        match guarded(token, timeout(query, self.service.is_service_enabled())).await? {
            Ok(true) => {}
            Ok(false) => return Err(LocationError::ServiceDisabled),
            Err(_elapsed) => return Err(query_timed_out("service enabled", query)),
        }

        let recent = if force_refresh {
            None
        } else {
            self.recent_fix(token).await?
        };
        let (fix, origin) = match recent {
            Some(fix) => (fix, FixOrigin::LastKnown),
            None => self.search_tiers(token).await?,
        };

        let resolved_address = self.describe(fix.coordinate, token).await?;
        Ok(LocationResult {
            coordinate: fix.coordinate,
            accuracy_meters: fix.accuracy_m,
            captured_at: fix.captured_at,
            resolved_address,
            origin,
        })
    }

    async fn ensure_permission(&self, token: &CancellationToken) -> Result<(), LocationError> {
        let query = self.config.query_timeout;
        let current = guarded(token, timeout(query, self.service.permission_status()))
            .await?
            .map_err(|_elapsed| query_timed_out("permission status", query))?;
        let status = match current {
            PermissionStatus::Undetermined => {
                let prompt = self.config.permission_prompt_timeout;
                guarded(token, timeout(prompt, self.service.request_permission()))
                    .await?
                    .unwrap_or_else(|_elapsed| {
                        log::debug!("permission prompt unanswered after {prompt:?}");
                        PermissionStatus::Denied
                    })
            }
            known => known,
        };
        match status {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied | PermissionStatus::Undetermined => {
                Err(LocationError::PermissionDenied)
            }
        }
    }

    async fn recent_fix(
        &self,
        token: &CancellationToken,
    ) -> Result<Option<PositionFix>, LocationError> {
        let max_age = self.config.last_known_max_age;
        let max_accuracy = self.config.last_known_max_accuracy_m;
        let query = self.config.query_timeout;
        let lookup = timeout(query, self.service.last_known_position(max_age, max_accuracy));
        let Ok(fix) = guarded(token, lookup).await? else {
            log::debug!("last-known query timed out after {query:?}; searching tiers");
            return Ok(None);
        };
        Ok(fix.filter(|fix| fix.accuracy_m <= max_accuracy && fix.age() <= max_age))
    }

    async fn search_tiers(
        &self,
        token: &CancellationToken,
    ) -> Result<(PositionFix, FixOrigin), LocationError> {
        let mut last_error = None;
        for tier in &self.config.tiers {
            log::debug!(
                "requesting {:?} accuracy fix within {:?}",
                tier.accuracy,
                tier.timeout
            );
            let request = self.service.current_position(tier.accuracy, tier.timeout);
            match guarded(token, tokio::time::timeout(tier.timeout, request)).await? {
                Ok(Ok(fix)) => return Ok((fix, FixOrigin::Live(tier.accuracy))),
                Ok(Err(error)) => {
                    log::debug!("{:?} tier failed: {error}", tier.accuracy);
                    last_error = Some(error);
                }
                Err(_elapsed) => {
                    log::debug!("{:?} tier timed out", tier.accuracy);
                    last_error = Some(PositioningError::Timeout {
                        accuracy: tier.accuracy,
                        timeout_secs: tier.timeout.as_secs(),
                    });
                }
            }
        }

        let source = last_error.unwrap_or_else(|| PositioningError::Unavailable {
            message: "no accuracy tiers configured".to_owned(),
        });
        Err(LocationError::PositionUnavailable { source })
    }

    async fn describe(
        &self,
        coordinate: Coordinate,
        token: &CancellationToken,
    ) -> Result<String, LocationError> {
        let limit = self.config.reverse_geocode_timeout;
        let lookup = timeout(limit, self.service.reverse_geocode(coordinate));
        let described = match guarded(token, lookup).await? {
            Ok(Ok(address)) => address.formatted().ok_or(PositioningError::ReverseGeocodeFailed {
                message: "no address components".to_owned(),
            }),
            Ok(Err(error)) => Err(error),
            Err(_elapsed) => Err(PositioningError::ReverseGeocodeFailed {
                message: format!("no answer within {limit:?}"),
            }),
        };
        Ok(described.unwrap_or_else(|error| {
            log::warn!("reverse geocoding failed, using placeholder: {error}");
            self.config.address_placeholder.clone()
        }))
    }

    async fn complete(
        &self,
        generation: u64,
        token: &CancellationToken,
        outcome: Result<LocationResult, LocationError>,
    ) -> Result<LocationResult, LocationError> {
        let mut state = self.state.lock().await;
        if state.generation != generation || token.is_cancelled() {
            log::debug!("discarding superseded location attempt {generation}");
            return Err(LocationError::Cancelled);
        }
        state.in_flight = None;
        let settled = match &outcome {
            Ok(result) => {
                state
                    .cache
                    .store(result.clone(), Instant::now() + self.config.cache_ttl);
                ResolverStatus::Ready(result.clone())
            }
            Err(error) => ResolverStatus::Failed(error.clone()),
        };
        state.settled = settled.clone();
        self.status.send_replace(settled);
        outcome
    }
}

impl<P> Drop for LocationResolver<P> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

/// Undoes an attempt's registration when its `resolve` future is dropped
/// before completing.
struct AttemptGuard<'a, P> {
    resolver: &'a LocationResolver<P>,
    generation: u64,
    token: CancellationToken,
    settled: bool,
}

impl<P> AttemptGuard<'_, P> {
    fn disarm(mut self) {
        self.settled = true;
    }
}

impl<P> Drop for AttemptGuard<'_, P> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.token.cancel();
        // A held lock means a newer attempt or a teardown is rewriting the
        // state; either one supersedes this attempt.
        let Ok(mut state) = self.resolver.state.try_lock() else {
            return;
        };
        if state.generation != self.generation {
            return;
        }
        log::debug!("location attempt {} abandoned by its caller", self.generation);
        state.in_flight = None;
        self.resolver.status.send_replace(state.settled.clone());
    }
}

fn query_timed_out(query: &'static str, limit: Duration) -> LocationError {
    LocationError::PositionUnavailable {
        source: PositioningError::QueryTimeout {
            query,
            timeout_secs: limit.as_secs(),
        },
    }
}

/// Await `future` unless `token` is cancelled first.
async fn guarded<F>(token: &CancellationToken, future: F) -> Result<F::Output, LocationError>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(LocationError::Cancelled),
        output = future => Ok(output),
    }
}

//! Scripted `PositioningService` used by unit and behaviour tests.
//!
//! Live fixes are served from a queue in call order, each after an optional
//! delay measured on the Tokio clock. Pair it with a paused runtime to step
//! through tier timeouts deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::sync::Mutex;
use wayfarer_core::Coordinate;

use crate::{Accuracy, Address, PermissionStatus, PositionFix, PositioningError, PositioningService};

/// Build a fix taken now.
#[must_use]
pub fn fix_at(latitude: f64, longitude: f64, accuracy_m: f64) -> PositionFix {
    PositionFix {
        coordinate: Coordinate::new(latitude, longitude),
        accuracy_m,
        captured_at: SystemTime::now(),
    }
}

/// One queued answer to [`PositioningService::current_position`].
#[derive(Debug, Clone)]
pub struct ScriptedFix {
    /// Time the service takes before answering.
    pub delay: Duration,
    /// The answer.
    pub outcome: Result<PositionFix, PositioningError>,
}

/// Deterministic positioning service.
#[derive(Debug)]
pub struct ScriptedPositioningService {
    permission: PermissionStatus,
    permission_on_request: PermissionStatus,
    service_enabled: bool,
    last_known: Option<PositionFix>,
    address: Result<Address, PositioningError>,
    status_delay: Duration,
    last_known_delay: Duration,
    geocode_delay: Duration,
    fixes: Mutex<VecDeque<ScriptedFix>>,
    requested: Mutex<Vec<Accuracy>>,
    position_requests: AtomicUsize,
    last_known_requests: AtomicUsize,
    permission_prompts: AtomicUsize,
}

impl ScriptedPositioningService {
    /// A service with permission granted, location enabled, no last-known
    /// fix, no queued live fixes, and a Ho Chi Minh City address.
    #[must_use]
    pub fn granted() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            permission_on_request: PermissionStatus::Denied,
            service_enabled: true,
            last_known: None,
            address: Ok(Address {
                street: Some("1 Le Loi".to_owned()),
                district: Some("District 1".to_owned()),
                city: Some("Ho Chi Minh City".to_owned()),
                ..Address::default()
            }),
            status_delay: Duration::ZERO,
            last_known_delay: Duration::ZERO,
            geocode_delay: Duration::ZERO,
            fixes: Mutex::new(VecDeque::new()),
            requested: Mutex::new(Vec::new()),
            position_requests: AtomicUsize::new(0),
            last_known_requests: AtomicUsize::new(0),
            permission_prompts: AtomicUsize::new(0),
        }
    }

    /// Set the current permission status and the answer to a prompt.
    #[must_use]
    pub const fn with_permission(
        mut self,
        current: PermissionStatus,
        on_request: PermissionStatus,
    ) -> Self {
        self.permission = current;
        self.permission_on_request = on_request;
        self
    }

    /// Set whether location services are enabled.
    #[must_use]
    pub const fn with_service_enabled(mut self, enabled: bool) -> Self {
        self.service_enabled = enabled;
        self
    }

    /// Offer `fix` as the last-known position.
    #[must_use]
    pub const fn with_last_known(mut self, fix: PositionFix) -> Self {
        self.last_known = Some(fix);
        self
    }

    /// Queue a live-fix answer.
    #[must_use]
    pub fn with_fix(mut self, delay: Duration, outcome: Result<PositionFix, PositioningError>) -> Self {
        self.fixes.get_mut().push_back(ScriptedFix { delay, outcome });
        self
    }

    /// Set the reverse-geocoding answer.
    #[must_use]
    pub fn with_address(mut self, address: Result<Address, PositioningError>) -> Self {
        self.address = address;
        self
    }

    /// Delay the permission and service-enabled answers.
    #[must_use]
    pub const fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    /// Delay the last-known answer.
    #[must_use]
    pub const fn with_last_known_delay(mut self, delay: Duration) -> Self {
        self.last_known_delay = delay;
        self
    }

    /// Delay the reverse-geocoding answer.
    #[must_use]
    pub const fn with_geocode_delay(mut self, delay: Duration) -> Self {
        self.geocode_delay = delay;
        self
    }

    /// Number of live-fix requests made.
    #[must_use]
    pub fn position_requests(&self) -> usize {
        self.position_requests.load(Ordering::SeqCst)
    }

    /// Number of last-known queries made.
    #[must_use]
    pub fn last_known_requests(&self) -> usize {
        self.last_known_requests.load(Ordering::SeqCst)
    }

    /// Number of permission prompts shown.
    #[must_use]
    pub fn permission_prompts(&self) -> usize {
        self.permission_prompts.load(Ordering::SeqCst)
    }

    /// Accuracies of the live requests made, in order.
    pub async fn requested_accuracies(&self) -> Vec<Accuracy> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl PositioningService for ScriptedPositioningService {
    async fn permission_status(&self) -> PermissionStatus {
        stall(self.status_delay).await;
        self.permission
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission_prompts.fetch_add(1, Ordering::SeqCst);
        self.permission_on_request
    }

    async fn is_service_enabled(&self) -> bool {
        stall(self.status_delay).await;
        self.service_enabled
    }

    async fn last_known_position(
        &self,
        _max_age: Duration,
        _required_accuracy_m: f64,
    ) -> Option<PositionFix> {
        self.last_known_requests.fetch_add(1, Ordering::SeqCst);
        stall(self.last_known_delay).await;
        self.last_known
    }

    async fn current_position(
        &self,
        accuracy: Accuracy,
        _timeout: Duration,
    ) -> Result<PositionFix, PositioningError> {
        self.position_requests.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().await.push(accuracy);
        let next = self.fixes.lock().await.pop_front();
        let Some(scripted) = next else {
            return Err(PositioningError::Unavailable {
                message: "no scripted fix".to_owned(),
            });
        };
        tokio::time::sleep(scripted.delay).await;
        scripted.outcome
    }

    async fn reverse_geocode(&self, _coordinate: Coordinate) -> Result<Address, PositioningError> {
        stall(self.geocode_delay).await;
        self.address.clone()
    }
}

async fn stall(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

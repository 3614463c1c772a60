//! Boundary to the platform positioning service.

use std::time::Duration;

use async_trait::async_trait;
use wayfarer_core::Coordinate;

use crate::{Accuracy, Address, PermissionStatus, PositionFix, PositioningError};

/// Device positioning capabilities used by [`crate::LocationResolver`].
///
/// Implementations wrap the platform API. Calls may suspend for as long as
/// the platform needs; the resolver applies its own timeouts and
/// cancellation around every call.
#[async_trait]
pub trait PositioningService: Send + Sync {
    /// Current permission state, without prompting.
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user for permission and return the outcome.
    async fn request_permission(&self) -> PermissionStatus;

    /// Whether location services are switched on.
    async fn is_service_enabled(&self) -> bool;

    /// A cached fix no older than `max_age` and no less accurate than
    /// `required_accuracy_m`, if the platform has one.
    async fn last_known_position(
        &self,
        max_age: Duration,
        required_accuracy_m: f64,
    ) -> Option<PositionFix>;

    /// Request a live fix at `accuracy`.
    ///
    /// `timeout` is advisory; the resolver enforces it independently.
    async fn current_position(
        &self,
        accuracy: Accuracy,
        timeout: Duration,
    ) -> Result<PositionFix, PositioningError>;

    /// Address components for `coordinate`.
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Address, PositioningError>;
}

//! Errors raised while resolving the device position.

use thiserror::Error;

use crate::Accuracy;

/// Failures reported by a [`crate::PositioningService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositioningError {
    /// A live request did not complete within its tier timeout.
    #[error("{accuracy:?} accuracy fix timed out after {timeout_secs}s")]
    Timeout {
        /// Accuracy of the tier that timed out.
        accuracy: Accuracy,
        /// Tier timeout in whole seconds.
        timeout_secs: u64,
    },
    /// A permission or service-status query did not answer in time.
    #[error("{query} query timed out after {timeout_secs}s")]
    QueryTimeout {
        /// The query that stalled.
        query: &'static str,
        /// Query timeout in whole seconds.
        timeout_secs: u64,
    },
    /// The service could not produce a fix.
    #[error("position unavailable: {message}")]
    Unavailable {
        /// Service-provided description.
        message: String,
    },
    /// The service could not turn a coordinate into an address.
    #[error("reverse geocoding failed: {message}")]
    ReverseGeocodeFailed {
        /// Service-provided description.
        message: String,
    },
}

/// Errors returned by [`crate::LocationResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// Location services are switched off on the device.
    #[error("location services are disabled")]
    ServiceDisabled,
    /// Every accuracy tier failed or timed out, or a status query stalled.
    #[error("no position fix available")]
    PositionUnavailable {
        /// Failure of the last tier attempted, or the stalled query.
        #[source]
        source: PositioningError,
    },
    /// The attempt was superseded by a newer one or the resolver was torn
    /// down. Nothing was published.
    #[error("location request cancelled")]
    Cancelled,
}

impl LocationError {
    /// Message telling the user how to recover, if the error is theirs to fix.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_location::LocationError;
    ///
    /// assert!(LocationError::ServiceDisabled.guidance().is_some());
    /// assert!(LocationError::Cancelled.guidance().is_none());
    /// ```
    #[must_use]
    pub const fn guidance(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied => {
                Some("Allow location access for this app in your device settings.")
            }
            Self::ServiceDisabled => Some("Turn on location services (GPS) and try again."),
            Self::PositionUnavailable { .. } => {
                Some("Move to an open area with a clear view of the sky and try again.")
            }
            Self::Cancelled => None,
        }
    }

    /// Whether the error reflects a superseded or torn-down attempt.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

//! Value types exchanged with the positioning service and returned to callers.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};
use wayfarer_core::Coordinate;

/// Whether the application may read the device position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    /// Access was granted.
    Granted,
    /// Access was refused.
    Denied,
    /// The user has not been asked yet.
    Undetermined,
}

/// Requested accuracy of a live position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accuracy {
    /// Network-based, fast and coarse.
    Low,
    /// Mixed sources.
    Balanced,
    /// Satellite fix, slow and precise.
    High,
}

/// One step of the progressive-accuracy search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccuracyTier {
    /// Accuracy requested from the service.
    pub accuracy: Accuracy,
    /// Time allowed before moving on to the next tier.
    pub timeout: Duration,
}

impl AccuracyTier {
    /// Construct a tier.
    #[must_use]
    pub const fn new(accuracy: Accuracy, timeout: Duration) -> Self {
        Self { accuracy, timeout }
    }
}

/// A raw position reported by the positioning service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// Reported position.
    pub coordinate: Coordinate,
    /// Claimed horizontal accuracy radius in metres.
    pub accuracy_m: f64,
    /// When the fix was taken.
    pub captured_at: SystemTime,
}

impl PositionFix {
    /// Time elapsed since the fix was taken.
    ///
    /// A timestamp in the future counts as zero age.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.captured_at.elapsed().unwrap_or_default()
    }
}

/// Address components from reverse geocoding.
///
/// Every component is optional; services fill what they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name and number.
    pub street: Option<String>,
    /// District or neighbourhood.
    pub district: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province or state.
    pub region: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
}

impl Address {
    /// Join the non-blank components with `", "`, most specific first.
    ///
    /// Returns `None` when no component carries text.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_location::Address;
    ///
    /// let address = Address {
    ///     street: Some("1 Le Loi".into()),
    ///     city: Some("Ho Chi Minh City".into()),
    ///     ..Address::default()
    /// };
    /// assert_eq!(address.formatted().as_deref(), Some("1 Le Loi, Ho Chi Minh City"));
    /// assert_eq!(Address::default().formatted(), None);
    /// ```
    #[must_use]
    pub fn formatted(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.street,
            &self.district,
            &self.city,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref().map(str::trim))
        .filter(|part| !part.is_empty())
        .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

/// How a [`LocationResult`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "accuracy")]
pub enum FixOrigin {
    /// Recent fix reused from the service's last-known position.
    LastKnown,
    /// Live fix from the tier with the given accuracy.
    Live(Accuracy),
}

/// A resolved device position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResult {
    /// Device position.
    pub coordinate: Coordinate,
    /// Claimed accuracy radius in metres.
    pub accuracy_meters: f64,
    /// When the underlying fix was taken.
    pub captured_at: SystemTime,
    /// Human-readable address, or the configured placeholder.
    pub resolved_address: String,
    /// Whether the fix came from the fast path or a live tier.
    pub origin: FixOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::blank_parts_skipped(
        Address { street: Some("  ".into()), city: Some("Da Nang".into()), ..Address::default() },
        Some("Da Nang")
    )]
    #[case::postal_code_before_country(
        Address {
            district: Some("District 1".into()),
            postal_code: Some("700000".into()),
            country: Some("Vietnam".into()),
            ..Address::default()
        },
        Some("District 1, 700000, Vietnam")
    )]
    #[case::nothing_usable(Address::default(), None)]
    fn formats_address(#[case] address: Address, #[case] expected: Option<&str>) {
        assert_eq!(address.formatted().as_deref(), expected);
    }

    #[rstest]
    fn future_fix_has_zero_age() {
        let fix = PositionFix {
            coordinate: Coordinate::new(10.0, 106.0),
            accuracy_m: 5.0,
            captured_at: SystemTime::now() + Duration::from_secs(60),
        };
        assert_eq!(fix.age(), Duration::ZERO);
    }
}

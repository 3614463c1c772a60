//! Test helpers for writing route requests and swapping in planner doubles.

use super::*;
use crate::plan::{CliPlanner, PlanConfig, PlanPlannerBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use wayfarer_core::test_support::{StraightLineDirectionsProvider, UnreachableDirectionsProvider};
use wayfarer_core::{Coordinate, DirectionsProvider, RouteMode, RoutePlanner, RouteRequest};

pub(super) const HANOI: Coordinate = Coordinate::new(21.0285, 105.8542);
pub(super) const HAI_PHONG: Coordinate = Coordinate::new(20.8449, 106.6881);
pub(super) const BAC_NINH: Coordinate = Coordinate::new(21.1861, 106.0763);
pub(super) const HA_LONG: Coordinate = Coordinate::new(20.9517, 107.0800);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_request(path: &Utf8Path, request: &RouteRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Hanoi to Ha Long with two stops, listed out of visiting order.
pub(super) fn multi_stop_request() -> RouteRequest {
    RouteRequest::new(HANOI, HA_LONG)
        .with_stops(vec![HAI_PHONG, BAC_NINH])
        .with_mode(RouteMode::MultiStop)
}

/// Planner doubles that ignore the resolved configuration.
#[derive(Debug, Clone, Copy)]
pub(super) enum StubPlannerBuilder {
    StraightLine,
    Unreachable,
}

impl PlanPlannerBuilder for StubPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<CliPlanner, CliError> {
        let provider: Box<dyn DirectionsProvider> = match self {
            Self::StraightLine => Box::new(StraightLineDirectionsProvider),
            Self::Unreachable => Box::new(UnreachableDirectionsProvider),
        };
        Ok(RoutePlanner::new(provider))
    }
}

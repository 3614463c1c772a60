//! Plan command implementation for the Wayfarer CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{
    DEFAULT_VIEWPORT_PADDING, DirectionsProvider, MapViewport, PlannerConfig, RoutePlanner,
    RouteRequest, RouteResult,
};
use wayfarer_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_API_KEY, ARG_PLAN_DIRECTIONS_URL, ARG_PLAN_OFFLINE, ARG_PLAN_REQUEST,
    ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a route for a JSON-encoded RouteRequest. Stops are \
                 ordered by nearest neighbour, the directions service is \
                 queried for road geometry, and an approximate route is \
                 synthesised when the service is unavailable or disabled.",
    about = "Plan a route from a JSON request"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a RouteRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL for the directions service (e.g. "http://localhost:5000").
    #[arg(long = ARG_PLAN_DIRECTIONS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_url: Option<String>,
    /// Access key for the directions service.
    #[arg(long = ARG_PLAN_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Skip the directions service and synthesise the route locally.
    #[arg(long = ARG_PLAN_OFFLINE)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) offline: bool,
    /// Directions request timeout in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Directions service settings; `None` plans offline.
    pub(crate) directions: Option<HttpDirectionsProviderConfig>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_PLAN_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_PLAN_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        if args.timeout_secs == Some(0) {
            return Err(CliError::ZeroTimeout);
        }
        if args.offline {
            return Ok(Self {
                request_path,
                directions: None,
            });
        }

        let mut directions = HttpDirectionsProviderConfig::default();
        if let Some(base_url) = args.directions_url {
            directions.base_url = base_url;
        }
        if let Some(api_key) = args.api_key {
            directions = directions.with_api_key(api_key);
        }
        if let Some(secs) = args.timeout_secs {
            directions = directions.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            request_path,
            directions: Some(directions),
        })
    }
}

/// Planner type used by the CLI; the provider is chosen at run time.
pub(crate) type CliPlanner = RoutePlanner<Box<dyn DirectionsProvider>>;

/// Builds a planner for the current plan invocation.
pub(super) trait PlanPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<CliPlanner, CliError>;
}

pub(super) struct DefaultPlanPlannerBuilder;

impl PlanPlannerBuilder for DefaultPlanPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<CliPlanner, CliError> {
        let Some(directions) = config.directions.as_ref() else {
            log::info!("planning offline; the route will be synthesised");
            return Ok(RoutePlanner::with_config(None, PlannerConfig::default()));
        };
        let provider = HttpDirectionsProvider::with_config(directions.clone()).map_err(
            |source| CliError::BuildDirectionsProvider {
                base_url: directions.base_url.clone(),
                source,
            },
        )?;
        Ok(RoutePlanner::new(Box::new(provider)))
    }
}

/// JSON document printed by the `plan` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanOutput {
    /// The planned route.
    pub(crate) route: RouteResult,
    /// Padded bounds for displaying the route, absent for an empty route.
    pub(crate) viewport: Option<MapViewport>,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanPlannerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanPlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let output = execute_plan(&config, builder)?;
    write_plan_output(writer, &output)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanPlannerBuilder,
) -> Result<PlanOutput, CliError> {
    let request = load_route_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRouteRequest {
            path: config.request_path.clone(),
            source,
        })?;
    let planner = builder.build(config)?;
    let route = planner.plan(&request);
    log::info!(
        "planned {} km ({}) through {} waypoints",
        route.distance_km,
        route.duration_text,
        route.ordered_waypoints.len()
    );
    let viewport = MapViewport::fit(&route, DEFAULT_VIEWPORT_PADDING);
    Ok(PlanOutput { route, viewport })
}

/// Loads a JSON-encoded [`RouteRequest`] from disk.
pub(super) fn load_route_request(path: &Utf8Path) -> Result<RouteRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRouteRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRouteRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_output(writer: &mut dyn Write, output: &PlanOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlanOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}

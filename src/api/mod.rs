use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    GAP_TARGET, GapMetrics, Inputs, ProjectId, ProjectOutcome, Projection, START_YEAR,
    TrajectoryPoint, catalog, export, run_projection,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliProject {
    LapssetCorridor,
    RufijiHydroDam,
    EasternAngolaAgri,
    EgyptPharma,
    NacalaCorridor,
    NigeriaMfgZones,
}

impl From<CliProject> for ProjectId {
    fn from(value: CliProject) -> Self {
        match value {
            CliProject::LapssetCorridor => ProjectId::LapssetCorridor,
            CliProject::RufijiHydroDam => ProjectId::RufijiHydroDam,
            CliProject::EasternAngolaAgri => ProjectId::EasternAngolaAgri,
            CliProject::EgyptPharma => ProjectId::EgyptPharma,
            CliProject::NacalaCorridor => ProjectId::NacalaCorridor,
            CliProject::NigeriaMfgZones => ProjectId::NigeriaMfgZones,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiProject {
    #[serde(alias = "lapssetCorridor", alias = "lapsset_corridor")]
    LapssetCorridor,
    #[serde(alias = "rufijiHydroDam", alias = "rufiji_hydro_dam")]
    RufijiHydroDam,
    #[serde(alias = "easternAngolaAgri", alias = "eastern_angola_agri")]
    EasternAngolaAgri,
    #[serde(alias = "egyptPharma", alias = "egypt_pharma")]
    EgyptPharma,
    #[serde(alias = "nacalaCorridor", alias = "nacala_corridor")]
    NacalaCorridor,
    #[serde(alias = "nigeriaMfgZones", alias = "nigeria_mfg_zones")]
    NigeriaMfgZones,
}

impl From<ApiProject> for CliProject {
    fn from(value: ApiProject) -> Self {
        match value {
            ApiProject::LapssetCorridor => CliProject::LapssetCorridor,
            ApiProject::RufijiHydroDam => CliProject::RufijiHydroDam,
            ApiProject::EasternAngolaAgri => CliProject::EasternAngolaAgri,
            ApiProject::EgyptPharma => CliProject::EgyptPharma,
            ApiProject::NacalaCorridor => CliProject::NacalaCorridor,
            ApiProject::NigeriaMfgZones => CliProject::NigeriaMfgZones,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    btc_seed: Option<f64>,
    btc_growth_rate: Option<f64>,
    years: Option<u32>,
    bond_amount: Option<f64>,
    bond_yield: Option<f64>,
    fdi_amount: Option<f64>,
    nft_amount: Option<f64>,
    project: Option<ApiProject>,
    tranche: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "ail2045",
    about = "AIL-2045 infrastructure financing projection (BTC seed + bonds + crypto FDI + carbon NFTs)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 35.0,
        help = "BTC seed capital in $ billions, 5 to 100 in steps of 5"
    )]
    btc_seed: f64,
    #[arg(
        long,
        default_value_t = 15.0,
        help = "Annual BTC growth rate in percent, 1 to 30"
    )]
    btc_growth_rate: f64,
    #[arg(long, default_value_t = 19, help = "Investment horizon in years, 5 to 30")]
    years: u32,
    #[arg(
        long,
        default_value_t = 200.0,
        help = "BTC-backed bond issuance in $ billions, 10 to 400 in steps of 25"
    )]
    bond_amount: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Bond yield in percent, 1 to 8 in steps of 0.5"
    )]
    bond_yield: f64,
    #[arg(
        long,
        default_value_t = 50.0,
        help = "Crypto FDI inflows in $ billions, 5 to 150 in steps of 10"
    )]
    fdi_amount: f64,
    #[arg(
        long,
        default_value_t = 15.0,
        help = "Carbon NFT issuance in $ billions, 1 to 100 in steps of 5"
    )]
    nft_amount: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliProject::LapssetCorridor,
        help = "Infrastructure project to evaluate a tranche against"
    )]
    project: CliProject,
    #[arg(
        long,
        help = "Tranche in $ millions; defaults to the selected project's declared default"
    )]
    tranche: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    gap_target: f64,
    start_year: u32,
    metrics: GapMetrics,
    trajectory: Vec<TrajectoryPoint>,
    project: ProjectOutcome,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    if !(5.0..=100.0).contains(&cli.btc_seed) {
        return Err("--btc-seed must be between 5 and 100".to_string());
    }

    if !(1.0..=30.0).contains(&cli.btc_growth_rate) {
        return Err("--btc-growth-rate must be between 1 and 30".to_string());
    }

    if !(5..=30).contains(&cli.years) {
        return Err("--years must be between 5 and 30".to_string());
    }

    if !(10.0..=400.0).contains(&cli.bond_amount) {
        return Err("--bond-amount must be between 10 and 400".to_string());
    }

    if !(1.0..=8.0).contains(&cli.bond_yield) {
        return Err("--bond-yield must be between 1 and 8".to_string());
    }

    if !(5.0..=150.0).contains(&cli.fdi_amount) {
        return Err("--fdi-amount must be between 5 and 150".to_string());
    }

    if !(1.0..=100.0).contains(&cli.nft_amount) {
        return Err("--nft-amount must be between 1 and 100".to_string());
    }

    let project: ProjectId = cli.project.into();
    let entry = catalog::project(project);
    let tranche = cli.tranche.unwrap_or(entry.tranche_default);
    if !(entry.tranche_min..=entry.tranche_max).contains(&tranche) {
        return Err(format!(
            "--tranche must be between {} and {} for {}",
            entry.tranche_min, entry.tranche_max, entry.name
        ));
    }

    Ok(Inputs {
        btc_seed: cli.btc_seed,
        btc_growth_rate: cli.btc_growth_rate / 100.0,
        years: cli.years,
        bond_amount: cli.bond_amount,
        bond_yield: cli.bond_yield / 100.0,
        fdi_amount: cli.fdi_amount,
        nft_amount: cli.nft_amount,
        project,
        tranche,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route("/api/projection/forecast.csv", get(forecast_csv_handler))
        .route("/api/projection/summary.csv", get(summary_csv_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("AIL-2045 projection API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_post_handler(Json(payload): Json<ProjectionPayload>) -> Response {
    projection_handler_impl(payload).await
}

async fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    match project_from_payload(payload) {
        Ok(projection) => json_response(StatusCode::OK, build_projection_response(projection)),
        Err(response) => response,
    }
}

async fn forecast_csv_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    let projection = match project_from_payload(payload) {
        Ok(projection) => projection,
        Err(response) => return response,
    };
    match export::trajectory_csv(&projection.trajectory) {
        Ok(body) => csv_response(body, "ail2045_forecast.csv"),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn summary_csv_handler(Query(payload): Query<ProjectionPayload>) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return bad_request(&msg),
    };
    let projection = match run_projection(&inputs) {
        Ok(projection) => projection,
        Err(e) => return bad_request(&e.to_string()),
    };
    match export::summary_csv(&inputs, &projection.metrics) {
        Ok(body) => csv_response(body, "ail2045_summary.csv"),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn project_from_payload(payload: ProjectionPayload) -> Result<Projection, Response> {
    let inputs = inputs_from_payload(payload).map_err(|msg| bad_request(&msg))?;
    run_projection(&inputs).map_err(|e| bad_request(&e.to_string()))
}

fn bad_request(msg: &str) -> Response {
    tracing::warn!("rejected projection request: {msg}");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn csv_response(body: String, filename: &str) -> Response {
    let mut response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: ProjectionPayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.btc_seed {
        cli.btc_seed = v;
    }
    if let Some(v) = payload.btc_growth_rate {
        cli.btc_growth_rate = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }
    if let Some(v) = payload.bond_amount {
        cli.bond_amount = v;
    }
    if let Some(v) = payload.bond_yield {
        cli.bond_yield = v;
    }
    if let Some(v) = payload.fdi_amount {
        cli.fdi_amount = v;
    }
    if let Some(v) = payload.nft_amount {
        cli.nft_amount = v;
    }
    if let Some(v) = payload.project {
        cli.project = v.into();
    }
    if let Some(v) = payload.tranche {
        cli.tranche = Some(v);
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        btc_seed: 35.0,
        btc_growth_rate: 15.0,
        years: 19,
        bond_amount: 200.0,
        bond_yield: 4.0,
        fdi_amount: 50.0,
        nft_amount: 15.0,
        project: CliProject::LapssetCorridor,
        tranche: None,
    }
}

fn build_projection_response(projection: Projection) -> ProjectionResponse {
    ProjectionResponse {
        gap_target: GAP_TARGET,
        start_year: START_YEAR,
        metrics: projection.metrics,
        trajectory: projection.trajectory,
        project: projection.project,
    }
}

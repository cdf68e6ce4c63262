use serde::Serialize;
use thiserror::Error;

use super::catalog::ProjectId;

/// Africa's infrastructure financing gap estimate, in $ billions.
pub const GAP_TARGET: f64 = 1500.0;

/// First calendar year of the projection horizon.
pub const START_YEAR: u32 = 2026;

#[derive(Debug, Clone)]
pub struct Inputs {
    /// BTC seed capital, $ billions.
    pub btc_seed: f64,
    /// Annual BTC growth rate as a decimal (0.15 = 15%).
    pub btc_growth_rate: f64,
    /// Investment horizon in years.
    pub years: u32,
    /// BTC-backed bond issuance, $ billions.
    pub bond_amount: f64,
    /// Bond yield as a decimal.
    pub bond_yield: f64,
    /// Crypto FDI inflows, $ billions.
    pub fdi_amount: f64,
    /// Carbon NFT issuance, $ billions.
    pub nft_amount: f64,
    /// Selected infrastructure project.
    pub project: ProjectId,
    /// Tranche committed to the selected project, $ millions.
    pub tranche: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapMetrics {
    pub btc_final: f64,
    pub btc_gain: f64,
    pub bond_interest: f64,
    pub fdi_return: f64,
    pub nft_return: f64,
    pub total_unlocked: f64,
    pub gap_covered_ratio: f64,
    pub total_principal: f64,
    pub roi_percent: f64,
    pub traditional_cost: f64,
    pub traditional_roi_percent: f64,
    pub savings: f64,
    pub cost_reduction_percent: f64,
    pub multiplier: f64,
    pub gdp_impact: f64,
    pub carbon_credit_megatons: f64,
    pub infrastructure_projects: u64,
    pub jobs: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub year: u32,
    pub btc_value: f64,
    pub cumulative_gain: f64,
    pub gap_coverage_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutcome {
    pub project: ProjectId,
    pub name: &'static str,
    pub description: &'static str,
    pub countries: &'static str,
    pub instrument: &'static str,
    /// Committed tranche, $ millions.
    pub tranche: f64,
    pub period_years: u32,
    pub annual_return_percent: f64,
    /// Final value, $ billions.
    pub value: f64,
    /// Gain over the tranche, $ billions.
    pub gain: f64,
    pub roi_percent: f64,
    pub multiplier: f64,
    pub local_gdp_impact: f64,
    pub jobs: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub metrics: GapMetrics,
    pub trajectory: Vec<TrajectoryPoint>,
    pub project: ProjectOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid input: {name} must be nonzero")]
    InvalidInput { name: &'static str },
}

use super::catalog::{self, Instrument, Project};
use super::types::{
    GAP_TARGET, GapMetrics, Inputs, ModelError, ProjectOutcome, Projection, START_YEAR,
    TrajectoryPoint,
};

/// Bond interest accrues as simple interest over a flat 10-period multiple.
const BOND_INTEREST_PERIODS: f64 = 10.0;

/// FDI capital compounds at a fixed pool rate over a fixed 10-year hold.
const FDI_POOL_RATE: f64 = 0.20;
const FDI_HOLD_YEARS: u32 = 10;

/// Carbon NFT issuance compounds at 12% over the model horizon.
const NFT_COMPOUND_RATE: f64 = 0.12;

/// Traditional-finance benchmark: sovereign bond coupons, FDI hurdle rate,
/// and custody drag on the seed capital.
const TRADITIONAL_PERIODS: f64 = 10.0;
const TRADITIONAL_BOND_RATE: f64 = 0.07;
const TRADITIONAL_FDI_RATE: f64 = 0.08;
const TRADITIONAL_CUSTODY_RATE: f64 = 0.03;

const JOBS_PER_BILLION: f64 = 100_000.0;
const GDP_IMPACT_SHARE: f64 = 0.3;
const PROJECT_GDP_SHARE: f64 = 0.4;
const CARBON_MEGATONS_PER_BILLION: f64 = 100.0;
/// Average cost of one infrastructure project, $ billions.
const PROJECT_UNIT_COST: f64 = 0.5;

pub fn run_projection(inputs: &Inputs) -> Result<Projection, ModelError> {
    let metrics = compute_metrics(inputs)?;
    let trajectory = build_trajectory(inputs);
    let project = evaluate_project(
        catalog::project(inputs.project),
        inputs.tranche,
        inputs.btc_growth_rate,
        inputs.years,
    )?;

    Ok(Projection {
        metrics,
        trajectory,
        project,
    })
}

pub fn compute_metrics(inputs: &Inputs) -> Result<GapMetrics, ModelError> {
    let btc_final = compound(inputs.btc_seed, inputs.btc_growth_rate, inputs.years);
    let btc_gain = btc_final - inputs.btc_seed;
    let bond_interest = inputs.bond_amount * inputs.bond_yield * BOND_INTEREST_PERIODS;
    let fdi_return = compound(inputs.fdi_amount, FDI_POOL_RATE, FDI_HOLD_YEARS);
    let nft_return = compound(inputs.nft_amount, NFT_COMPOUND_RATE, inputs.years);
    let total_unlocked = btc_final + bond_interest + fdi_return + nft_return;

    let total_principal =
        inputs.btc_seed + inputs.bond_amount + inputs.fdi_amount + inputs.nft_amount;
    let roi_percent =
        (total_unlocked - total_principal) / nonzero(total_principal, "total principal")? * 100.0;

    let traditional_cost = inputs.bond_amount * TRADITIONAL_BOND_RATE * TRADITIONAL_PERIODS
        + inputs.fdi_amount * TRADITIONAL_FDI_RATE * TRADITIONAL_PERIODS
        + inputs.btc_seed * TRADITIONAL_CUSTODY_RATE * inputs.years as f64;
    let traditional_principal = inputs.btc_seed + inputs.bond_amount + inputs.fdi_amount;
    let traditional_roi_percent =
        traditional_cost / nonzero(traditional_principal, "traditional principal")? * 100.0;

    let savings = (bond_interest + fdi_return + btc_gain + nft_return) - traditional_cost;
    let cost_reduction_percent = savings / nonzero(traditional_cost, "traditional cost")? * 100.0;
    let multiplier = total_unlocked / nonzero(inputs.btc_seed, "btc seed")?;

    Ok(GapMetrics {
        btc_final,
        btc_gain,
        bond_interest,
        fdi_return,
        nft_return,
        total_unlocked,
        gap_covered_ratio: total_unlocked / GAP_TARGET,
        total_principal,
        roi_percent,
        traditional_cost,
        traditional_roi_percent,
        savings,
        cost_reduction_percent,
        multiplier,
        gdp_impact: total_unlocked * GDP_IMPACT_SHARE,
        carbon_credit_megatons: nft_return * CARBON_MEGATONS_PER_BILLION,
        infrastructure_projects: floor_count(total_unlocked / PROJECT_UNIT_COST),
        jobs: floor_count(total_unlocked * JOBS_PER_BILLION),
    })
}

pub fn build_trajectory(inputs: &Inputs) -> Vec<TrajectoryPoint> {
    let mut points = Vec::with_capacity(inputs.years as usize + 1);
    for i in 0..=inputs.years {
        let btc_value = compound(inputs.btc_seed, inputs.btc_growth_rate, i);
        points.push(TrajectoryPoint {
            year: START_YEAR + i,
            btc_value,
            cumulative_gain: btc_value - inputs.btc_seed,
            gap_coverage_percent: btc_value / GAP_TARGET * 100.0,
        });
    }
    points
}

/// Evaluates a tranche against the selected project's return rule. Bond
/// tranches track the model-wide BTC growth rate over the full horizon; FDI
/// tranches use the rate declared on the catalog entry over a fixed 10-year
/// hold.
pub fn evaluate_project(
    project: &Project,
    tranche: f64,
    btc_growth_rate: f64,
    years: u32,
) -> Result<ProjectOutcome, ModelError> {
    let tranche_billions = nonzero(tranche, "tranche")? / 1000.0;
    let (value, period_years, annual_return_percent) = match project.instrument {
        Instrument::Bond => (
            compound(tranche_billions, btc_growth_rate, years),
            years,
            btc_growth_rate * 100.0,
        ),
        Instrument::Fdi { annual_rate } => (
            compound(tranche_billions, annual_rate, FDI_HOLD_YEARS),
            FDI_HOLD_YEARS,
            annual_rate * 100.0,
        ),
    };

    Ok(ProjectOutcome {
        project: project.id,
        name: project.name,
        description: project.description,
        countries: project.countries,
        instrument: project.instrument.label(),
        tranche,
        period_years,
        annual_return_percent,
        value,
        gain: value - tranche_billions,
        roi_percent: (value * 1000.0 - tranche) / tranche * 100.0,
        multiplier: value / tranche_billions,
        local_gdp_impact: value * PROJECT_GDP_SHARE,
        jobs: floor_count(value * JOBS_PER_BILLION),
    })
}

fn compound(principal: f64, rate: f64, periods: u32) -> f64 {
    principal * (1.0 + rate).powi(periods as i32)
}

fn nonzero(value: f64, name: &'static str) -> Result<f64, ModelError> {
    if value == 0.0 {
        Err(ModelError::InvalidInput { name })
    } else {
        Ok(value)
    }
}

fn floor_count(value: f64) -> u64 {
    value.max(0.0).floor() as u64
}

use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectId {
    LapssetCorridor,
    RufijiHydroDam,
    EasternAngolaAgri,
    EgyptPharma,
    NacalaCorridor,
    NigeriaMfgZones,
}

/// Return rule for a project tranche. FDI entries carry their own annual
/// rate instead of the model-wide BTC growth rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Instrument {
    Bond,
    Fdi { annual_rate: f64 },
}

impl Instrument {
    pub fn label(self) -> &'static str {
        match self {
            Instrument::Bond => "BTC Bond",
            Instrument::Fdi { .. } => "Crypto FDI",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub id: ProjectId,
    pub name: &'static str,
    pub description: &'static str,
    pub countries: &'static str,
    pub instrument: Instrument,
    /// Tranche bounds in $ millions.
    pub tranche_min: f64,
    pub tranche_max: f64,
    pub tranche_default: f64,
}

/// Tranche slider granularity, $ millions. Documentation only, not validated.
pub const TRANCHE_STEP: f64 = 50.0;

pub const PROJECTS: [Project; 6] = [
    Project {
        id: ProjectId::LapssetCorridor,
        name: "LAPSSET Corridor ($1.2B)",
        description: "Lamu Port-South Sudan-Ethiopia Transport Corridor",
        countries: "Kenya, Ethiopia, South Sudan",
        instrument: Instrument::Bond,
        tranche_min: 100.0,
        tranche_max: 1000.0,
        tranche_default: 500.0,
    },
    Project {
        id: ProjectId::RufijiHydroDam,
        name: "Rufiji Hydro Dam ($0.5B)",
        description: "2,100 MW Hydroelectric Power Project",
        countries: "Tanzania",
        instrument: Instrument::Fdi { annual_rate: 0.22 },
        tranche_min: 50.0,
        tranche_max: 500.0,
        tranche_default: 200.0,
    },
    Project {
        id: ProjectId::EasternAngolaAgri,
        name: "Eastern Angola Agri ($211M)",
        description: "Agricultural Development Zone",
        countries: "Angola",
        instrument: Instrument::Bond,
        tranche_min: 50.0,
        tranche_max: 300.0,
        tranche_default: 100.0,
    },
    Project {
        id: ProjectId::EgyptPharma,
        name: "Egypt Pharma ($746M)",
        description: "Pharmaceutical Manufacturing Hub",
        countries: "Egypt",
        instrument: Instrument::Bond,
        tranche_min: 100.0,
        tranche_max: 1000.0,
        tranche_default: 300.0,
    },
    Project {
        id: ProjectId::NacalaCorridor,
        name: "Nacala Corridor ($2.7B)",
        description: "Railway and Port Development",
        countries: "Mozambique, Malawi, Zambia",
        instrument: Instrument::Bond,
        tranche_min: 300.0,
        tranche_max: 1500.0,
        tranche_default: 800.0,
    },
    Project {
        id: ProjectId::NigeriaMfgZones,
        name: "Nigeria Mfg Zones ($300M+)",
        description: "Special Economic Zones",
        countries: "Nigeria",
        instrument: Instrument::Fdi { annual_rate: 0.25 },
        tranche_min: 50.0,
        tranche_max: 500.0,
        tranche_default: 150.0,
    },
];

pub fn project(id: ProjectId) -> &'static Project {
    let index = match id {
        ProjectId::LapssetCorridor => 0,
        ProjectId::RufijiHydroDam => 1,
        ProjectId::EasternAngolaAgri => 2,
        ProjectId::EgyptPharma => 3,
        ProjectId::NacalaCorridor => 4,
        ProjectId::NigeriaMfgZones => 5,
    };
    &PROJECTS[index]
}

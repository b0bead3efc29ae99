// src/schema/types.rs

use serde::{Deserialize, Serialize};

pub const ENTITY: &str = "Entity";
pub const CODE: &str = "Code";
pub const YEAR: &str = "Year";

/// Identifying columns that are never coerced to numbers.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [ENTITY, CODE, YEAR];

pub const BIOMASS_OTHER_TWH: &str = "Geo Biomass Other - TWh";
pub const SOLAR_TWH: &str = "Solar Generation - TWh";
pub const WIND_TWH: &str = "Wind Generation - TWh";
pub const HYDRO_TWH: &str = "Hydro Generation - TWh";
pub const MODERN_CONSUMPTION: &str = "modern-renewable-energy-consumption";

/// Every column the typed record reads.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    ENTITY,
    CODE,
    YEAR,
    BIOMASS_OTHER_TWH,
    SOLAR_TWH,
    WIND_TWH,
    HYDRO_TWH,
    MODERN_CONSUMPTION,
];

pub fn is_categorical(column: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&column)
}

/// The four tracked generation sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    BiomassOther,
    Solar,
    Wind,
    Hydro,
}

impl EnergySource {
    /// Display and chart order.
    pub const ALL: [EnergySource; 4] = [
        EnergySource::BiomassOther,
        EnergySource::Solar,
        EnergySource::Wind,
        EnergySource::Hydro,
    ];

    pub fn column(self) -> &'static str {
        match self {
            EnergySource::BiomassOther => BIOMASS_OTHER_TWH,
            EnergySource::Solar => SOLAR_TWH,
            EnergySource::Wind => WIND_TWH,
            EnergySource::Hydro => HYDRO_TWH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergySource::BiomassOther => "Biomass & Other",
            EnergySource::Solar => "Solar",
            EnergySource::Wind => "Wind",
            EnergySource::Hydro => "Hydro",
        }
    }

    /// Fill colour used by the bar and doughnut charts.
    pub fn colour(self) -> &'static str {
        match self {
            EnergySource::BiomassOther => "#1e7e34",
            EnergySource::Solar => "#ffc107",
            EnergySource::Wind => "#007bff",
            EnergySource::Hydro => "#20c997",
        }
    }

    /// Line colour used by the generation trend chart.
    pub fn trend_colour(self) -> &'static str {
        match self {
            EnergySource::BiomassOther => "#1e7e34",
            EnergySource::Solar => "#ffc107",
            EnergySource::Wind => "#28a745",
            EnergySource::Hydro => "#007bff",
        }
    }
}

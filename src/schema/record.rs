use serde::Serialize;

use super::types::{
    EnergySource, BIOMASS_OTHER_TWH, CODE, ENTITY, HYDRO_TWH, MODERN_CONSUMPTION, SOLAR_TWH,
    WIND_TWH, YEAR,
};
use crate::process::{Cell, NormalizedRow};

/// Typed view of one row over the fixed column set.
///
/// Absent columns, blanks and non-numeric text all read as `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyRecord {
    pub entity: Option<String>,
    pub code: Option<String>,
    /// The raw `Year` label, kept for chart axes.
    pub year_label: Option<String>,
    pub year: Option<i32>,
    pub biomass_other_twh: Option<f64>,
    pub solar_twh: Option<f64>,
    pub wind_twh: Option<f64>,
    pub hydro_twh: Option<f64>,
    pub modern_consumption_twh: Option<f64>,
}

impl EnergyRecord {
    pub fn from_row(row: &NormalizedRow) -> Self {
        let text = |column: &str| row.get(column).and_then(Cell::as_text).map(str::to_string);
        let number = |column: &str| row.get(column).and_then(Cell::as_number);
        let year = row
            .get(YEAR)
            .and_then(Cell::numeric_value)
            .filter(|y| y.fract() == 0.0 && *y >= i32::MIN as f64 && *y <= i32::MAX as f64)
            .map(|y| y as i32);

        Self {
            entity: text(ENTITY),
            code: text(CODE),
            year_label: text(YEAR),
            year,
            biomass_other_twh: number(BIOMASS_OTHER_TWH),
            solar_twh: number(SOLAR_TWH),
            wind_twh: number(WIND_TWH),
            hydro_twh: number(HYDRO_TWH),
            modern_consumption_twh: number(MODERN_CONSUMPTION),
        }
    }

    pub fn source(&self, source: EnergySource) -> Option<f64> {
        match source {
            EnergySource::BiomassOther => self.biomass_other_twh,
            EnergySource::Solar => self.solar_twh,
            EnergySource::Wind => self.wind_twh,
            EnergySource::Hydro => self.hydro_twh,
        }
    }

    /// Source value with anything missing counted as zero.
    pub fn source_or_zero(&self, source: EnergySource) -> f64 {
        self.source(source).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{normalize_records, parse_csv};

    const CSV: &str = "Entity,Code,Year,Geo Biomass Other - TWh,Solar Generation - TWh,Wind Generation - TWh,Hydro Generation - TWh,modern-renewable-energy-consumption
World,OWID_WRL,2021,762.5,1040.5,1848.3,4273.8,7925.1
Africa,,2021,,n/a,12,
";

    #[test]
    fn reads_fixed_columns() {
        let rows = normalize_records(&parse_csv(CSV).records);
        let world = EnergyRecord::from_row(&rows[0]);

        assert_eq!(world.entity.as_deref(), Some("World"));
        assert_eq!(world.code.as_deref(), Some("OWID_WRL"));
        assert_eq!(world.year, Some(2021));
        assert_eq!(world.year_label.as_deref(), Some("2021"));
        assert_eq!(world.source(EnergySource::Solar), Some(1040.5));
        assert_eq!(world.source(EnergySource::Hydro), Some(4273.8));
        assert_eq!(world.modern_consumption_twh, Some(7925.1));
    }

    #[test]
    fn blanks_and_text_read_as_missing() {
        let rows = normalize_records(&parse_csv(CSV).records);
        let africa = EnergyRecord::from_row(&rows[1]);

        assert_eq!(africa.code, None);
        assert_eq!(africa.biomass_other_twh, None);
        assert_eq!(africa.solar_twh, None);
        assert_eq!(africa.wind_twh, Some(12.0));
        assert_eq!(africa.source_or_zero(EnergySource::Solar), 0.0);
    }

    #[test]
    fn absent_columns_read_as_missing() {
        let rows = normalize_records(&parse_csv("Entity,Year\nWorld,2020\n").records);
        let record = EnergyRecord::from_row(&rows[0]);

        assert_eq!(record.year, Some(2020));
        for source in EnergySource::ALL {
            assert_eq!(record.source(source), None);
        }
    }
}

//! Coefficient tables keyed by category tuples
//!
//! The store is built once — from the embedded tables, optionally extended
//! with the four external parameter files — and is read-only afterwards.
//! Queries never mutate it, so a constructed store is safe to share across
//! threads.
//!
//! Each table cell is either a populated coefficient row or an explicit
//! "no formula" sentinel (`None`), mirroring the NaN rows of the source
//! tables. Both an absent key and a sentinel cell surface to callers as
//! unsupported combinations; the distinction only matters for table
//! round-trip comparisons.

pub mod loader;
mod static_tables;

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::categories::{
    CapacityBand, CopertClass, EngineType, HdvClass, HdvLoad, HdvSegment, MotoClass, MotoSegment,
    Pollutant, RoadSlope,
};
use crate::equations::{HeavyDutyEquation, LightDutyEquation};
use crate::error::Result;

/// A usable light-duty coefficient row: the resolved equation, the
/// post-Euro-5 reduction factor, and the validity speed window in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightDutyRow {
    pub equation: LightDutyEquation,
    /// Fractional de-rating applied as `×(1 - rf)`; zero for rows that
    /// carry none.
    pub reduction_factor: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl LightDutyRow {
    /// Hot emission factor in g/km at speed `v`. Regressions can dip below
    /// zero near the window edges, so the result is floored at zero.
    pub fn factor(&self, v: f64) -> f64 {
        (self.equation.evaluate(v) * (1.0 - self.reduction_factor)).max(0.0)
    }
}

/// A usable heavy-duty coefficient row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeavyDutyRow {
    pub equation: HeavyDutyEquation,
    pub v_min: f64,
    pub v_max: f64,
}

impl HeavyDutyRow {
    /// Hot emission factor in g/km at speed `x`, floored at zero.
    pub fn factor(&self, x: f64) -> f64 {
        self.equation.evaluate(x).max(0.0)
    }
}

/// Key of the passenger-car table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerKey {
    pub engine: EngineType,
    pub class: CopertClass,
    pub band: CapacityBand,
    pub pollutant: Pollutant,
}

/// Key of the light-commercial table. Light commercial vehicles are not
/// banded by capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightCommercialKey {
    pub engine: EngineType,
    pub class: CopertClass,
    pub pollutant: Pollutant,
}

/// Key of the heavy-duty/bus table, with the load and slope secondary
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HdvKey {
    pub segment: HdvSegment,
    pub class: HdvClass,
    pub pollutant: Pollutant,
    pub load: HdvLoad,
    pub slope: RoadSlope,
}

/// Key of the moped/motorcycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotoKey {
    pub segment: MotoSegment,
    pub class: MotoClass,
    pub pollutant: Pollutant,
}

/// The immutable coefficient store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterStore {
    passenger: FxHashMap<PassengerKey, Option<LightDutyRow>>,
    light_commercial: FxHashMap<LightCommercialKey, Option<LightDutyRow>>,
    heavy_duty: FxHashMap<HdvKey, Option<HeavyDutyRow>>,
    two_wheeler: FxHashMap<MotoKey, Option<LightDutyRow>>,
}

impl ParameterStore {
    /// Store holding only the embedded tables: passenger-car rows from
    /// Euro 1 through Euro 4. The pre-Euro classes are served by inline
    /// formulas in the resolver and have no table rows.
    pub fn static_only() -> Self {
        let mut store = ParameterStore::default();
        for (key, row) in static_tables::embedded_passenger_rows() {
            store.passenger.insert(key, row);
        }
        store
    }

    /// Store extended with the four external parameter files: passenger
    /// cars, light commercial vehicles, heavy-duty vehicles and buses,
    /// mopeds and motorcycles.
    ///
    /// # Errors
    /// Fails fast on unreadable files, malformed records, and category
    /// strings that do not translate; nothing is loaded partially.
    pub fn from_files(
        passenger: impl AsRef<Path>,
        light_commercial: impl AsRef<Path>,
        heavy_duty: impl AsRef<Path>,
        two_wheeler: impl AsRef<Path>,
    ) -> Result<Self> {
        let mut store = ParameterStore::static_only();
        for (key, row) in loader::load_passenger_file(passenger.as_ref())? {
            store.passenger.insert(key, row);
        }
        for (key, row) in loader::load_light_commercial_file(light_commercial.as_ref())? {
            store.light_commercial.insert(key, row);
        }
        for (key, row) in loader::load_heavy_duty_file(heavy_duty.as_ref())? {
            store.heavy_duty.insert(key, row);
        }
        for (key, row) in loader::load_two_wheeler_file(two_wheeler.as_ref())? {
            store.two_wheeler.insert(key, row);
        }
        Ok(store)
    }

    /// Passenger-car row lookup. `None` covers both "key never tabulated"
    /// and "tabulated as no formula".
    pub fn passenger(&self, key: &PassengerKey) -> Option<&LightDutyRow> {
        self.passenger.get(key).and_then(Option::as_ref)
    }

    /// Light-commercial row lookup.
    pub fn light_commercial(&self, key: &LightCommercialKey) -> Option<&LightDutyRow> {
        self.light_commercial.get(key).and_then(Option::as_ref)
    }

    /// Heavy-duty row lookup.
    pub fn heavy_duty(&self, key: &HdvKey) -> Option<&HeavyDutyRow> {
        self.heavy_duty.get(key).and_then(Option::as_ref)
    }

    /// Moped/motorcycle row lookup.
    pub fn two_wheeler(&self, key: &MotoKey) -> Option<&LightDutyRow> {
        self.two_wheeler.get(key).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn static_store_has_embedded_euro_1_co_row() {
        let store = ParameterStore::static_only();
        let row = store
            .passenger(&PassengerKey {
                engine: EngineType::Gasoline,
                class: CopertClass::Euro1,
                band: CapacityBand::Small,
                pollutant: Pollutant::CO,
            })
            .expect("embedded row");
        let v = 60.0;
        let expected = (11.2 - 0.102 * v + 6.77e-4 * v * v) / (1.0 + 0.129 * v - 9.47e-4 * v * v);
        assert_relative_eq!(row.factor(v), expected, max_relative = 1e-12);
    }

    #[test]
    fn diesel_small_band_rows_are_explicit_no_formula_through_euro_3() {
        let store = ParameterStore::static_only();
        for class in [CopertClass::Euro1, CopertClass::Euro2, CopertClass::Euro3] {
            let key = PassengerKey {
                engine: EngineType::Diesel,
                class,
                band: CapacityBand::Small,
                pollutant: Pollutant::CO,
            };
            // The cell exists and is the sentinel, not a NaN-filled row.
            assert!(store.passenger.contains_key(&key));
            assert!(store.passenger(&key).is_none());
        }
        // Euro 4 introduced the small diesel segment.
        assert!(store
            .passenger(&PassengerKey {
                engine: EngineType::Diesel,
                class: CopertClass::Euro4,
                band: CapacityBand::Small,
                pollutant: Pollutant::CO,
            })
            .is_some());
    }

    #[test]
    fn embedded_rows_are_finite_and_nonnegative_over_their_window() {
        let store = ParameterStore::static_only();
        for (key, row) in &store.passenger {
            let Some(row) = row else { continue };
            let mut v = row.v_min;
            while v <= row.v_max {
                let factor = row.factor(v);
                assert!(
                    factor.is_finite() && factor >= 0.0,
                    "{key:?} at {v} km/h gave {factor}"
                );
                v += 5.0;
            }
        }
    }

    #[test]
    fn reduction_factor_derates_multiplicatively() {
        let row = LightDutyRow {
            equation: LightDutyEquation::Linear { a: 2.0, b: 0.0 },
            reduction_factor: 0.25,
            v_min: 10.0,
            v_max: 130.0,
        };
        assert_relative_eq!(row.factor(50.0), 1.5);
    }

    #[test]
    fn negative_regression_values_floor_at_zero() {
        let row = LightDutyRow {
            equation: LightDutyEquation::Linear { a: 0.5, b: -0.05 },
            reduction_factor: 0.0,
            v_min: 10.0,
            v_max: 130.0,
        };
        assert_relative_eq!(row.factor(100.0), 0.0);
    }
}

//! Category resolver and public computation surface
//!
//! [`Copert`] owns the immutable [`ParameterStore`] and resolves every
//! (pollutant, category, standard, ...) tuple to its formula: pre-Euro
//! classes go to the inline legacy regressions, everything newer to the
//! coefficient tables. All factors are g/km at the mean travel speed;
//! emissions are factor × distance, uniformly across every branch.
//!
//! Missing table cells are surfaced as
//! [`CopertError::UnsupportedCombination`], never defaulted to zero: a
//! silent zero in an inventory is indistinguishable from a clean vehicle.

use crate::categories::{
    CapacityBand, CopertClass, EngineType, HdvClass, HdvLoad, HdvSegment, MotoClass,
    MotoSegment, Pollutant, RoadSlope, VehicleCategory,
};
use crate::error::{CopertError, Result};
use crate::legacy;
use crate::parameters::{
    HdvKey, LightCommercialKey, MotoKey, ParameterStore, PassengerKey,
};
use std::path::Path;

/// The emission engine: an immutable parameter store behind a resolver.
///
/// Construction is the only fallible phase; a built engine answers every
/// query from memory without I/O, so it can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct Copert {
    store: ParameterStore,
}

impl Default for Copert {
    fn default() -> Self {
        Copert::new()
    }
}

impl Copert {
    /// Engine backed by the embedded tables only (passenger cars, Euro 1
    /// through Euro 4, plus the inline pre-Euro regressions).
    pub fn new() -> Self {
        Copert {
            store: ParameterStore::static_only(),
        }
    }

    /// Engine extended with the four external parameter files.
    ///
    /// # Errors
    /// Propagates loader failures: unreadable files, malformed records,
    /// category strings that do not translate.
    pub fn from_files(
        passenger: impl AsRef<Path>,
        light_commercial: impl AsRef<Path>,
        heavy_duty: impl AsRef<Path>,
        two_wheeler: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Copert {
            store: ParameterStore::from_files(
                passenger,
                light_commercial,
                heavy_duty,
                two_wheeler,
            )?,
        })
    }

    /// The underlying coefficient store.
    pub fn parameters(&self) -> &ParameterStore {
        &self.store
    }

    /// Emission in grams over `distance` kilometers at mean speed `speed`,
    /// for passenger cars, light commercial vehicles, mopeds and
    /// motorcycles.
    ///
    /// A zero speed means the fleet did not move and emits nothing; this
    /// short-circuits before any window validation. The ambient
    /// temperature is accepted for signature parity with the cold-start
    /// helpers and does not affect hot emissions.
    ///
    /// # Errors
    /// Heavy-duty vehicles and buses need the segment, load and slope
    /// dimensions and are rejected here in favor of
    /// [`Copert::heavy_duty_emission`]. Otherwise propagates the factor
    /// lookup errors.
    pub fn emission(
        &self,
        pollutant: Pollutant,
        speed: f64,
        distance: f64,
        vehicle: VehicleCategory,
        engine: EngineType,
        class: CopertClass,
        capacity: f64,
        _ambient_temperature: f64,
    ) -> Result<f64> {
        if speed == 0.0 {
            return Ok(0.0);
        }
        let factor = match vehicle {
            VehicleCategory::PassengerCar => {
                self.hot_emission_factor_passenger_car(pollutant, speed, engine, class, capacity)?
            }
            VehicleCategory::LightCommercial => {
                self.hot_emission_factor_light_commercial(pollutant, speed, engine, class)?
            }
            VehicleCategory::Moped | VehicleCategory::Motorcycle => {
                let segment = MotoSegment::resolve(vehicle, engine, capacity)?;
                self.two_wheeler_factor(pollutant, speed, segment, class)?
            }
            VehicleCategory::HeavyDuty | VehicleCategory::Bus => {
                return Err(CopertError::unsupported(format!(
                    "{pollutant} for a {vehicle} without segment, load and slope; \
                     use heavy_duty_emission"
                )))
            }
        };
        Ok(factor * distance)
    }

    /// Hot emission factor in g/km for a passenger car of any engine type.
    ///
    /// # Errors
    /// Propagates the legacy or table lookup errors; engine types other
    /// than gasoline and diesel have no pre-Euro coverage.
    pub fn hot_emission_factor_passenger_car(
        &self,
        pollutant: Pollutant,
        speed: f64,
        engine: EngineType,
        class: CopertClass,
        capacity: f64,
    ) -> Result<f64> {
        match engine {
            EngineType::Gasoline => {
                self.hot_emission_factor_gasoline_passenger_car(pollutant, speed, class, capacity)
            }
            EngineType::Diesel => {
                self.hot_emission_factor_diesel_passenger_car(pollutant, speed, class, capacity)
            }
            other => {
                if class.is_pre_euro() {
                    return Err(CopertError::unsupported(format!(
                        "{pollutant}, {other} passenger car, {class}"
                    )));
                }
                self.passenger_table_factor(
                    other,
                    pollutant,
                    speed,
                    class,
                    CapacityBand::from_liters(capacity),
                )
            }
        }
    }

    /// Hot emission factor in g/km for a gasoline passenger car: inline
    /// legacy regressions before Euro 1, coefficient tables from Euro 1 on.
    ///
    /// # Errors
    /// [`CopertError::Domain`] outside the validity window,
    /// [`CopertError::UnsupportedCombination`] where no formula exists.
    pub fn hot_emission_factor_gasoline_passenger_car(
        &self,
        pollutant: Pollutant,
        speed: f64,
        class: CopertClass,
        capacity: f64,
    ) -> Result<f64> {
        if class.is_pre_euro() {
            return legacy::gasoline_passenger_car(pollutant, speed, class, capacity);
        }
        self.passenger_table_factor(
            EngineType::Gasoline,
            pollutant,
            speed,
            class,
            CapacityBand::from_liters(capacity),
        )
    }

    /// Hot emission factor in g/km for a diesel passenger car. The
    /// pre-Euro steps collapse to one Conventional regression set, not
    /// banded by capacity.
    ///
    /// # Errors
    /// Same taxonomy as the gasoline counterpart.
    pub fn hot_emission_factor_diesel_passenger_car(
        &self,
        pollutant: Pollutant,
        speed: f64,
        class: CopertClass,
        capacity: f64,
    ) -> Result<f64> {
        if class.is_pre_euro() {
            return legacy::diesel_passenger_car(pollutant, speed);
        }
        self.passenger_table_factor(
            EngineType::Diesel,
            pollutant,
            speed,
            class,
            CapacityBand::from_liters(capacity),
        )
    }

    /// Hot emission factor in g/km for a light commercial vehicle.
    ///
    /// # Errors
    /// Same taxonomy as the passenger-car factors.
    pub fn hot_emission_factor_light_commercial(
        &self,
        pollutant: Pollutant,
        speed: f64,
        engine: EngineType,
        class: CopertClass,
    ) -> Result<f64> {
        if class.is_pre_euro() {
            return legacy::light_commercial(pollutant, speed, engine);
        }
        let key = LightCommercialKey {
            engine,
            class,
            pollutant: table_pollutant(pollutant, class),
        };
        let context = || format!("{pollutant}, {engine} light commercial vehicle, {class}");
        let row = self
            .store
            .light_commercial(&key)
            .ok_or_else(|| CopertError::unsupported(context()))?;
        if speed < row.v_min || speed > row.v_max {
            return Err(CopertError::speed_outside(
                speed, row.v_min, row.v_max, context(),
            ));
        }
        Ok(row.factor(speed))
    }

    /// Hot emission factor in g/km for a heavy-duty vehicle or bus, fully
    /// keyed by segment, standard, load state and road slope.
    ///
    /// # Errors
    /// [`CopertError::UnsupportedCombination`] for cells the tables leave
    /// empty, [`CopertError::Domain`] outside the row's speed window.
    pub fn hot_emission_factor_heavy_duty(
        &self,
        pollutant: Pollutant,
        speed: f64,
        segment: HdvSegment,
        class: HdvClass,
        load: HdvLoad,
        slope: RoadSlope,
    ) -> Result<f64> {
        let key = HdvKey {
            segment,
            class,
            pollutant,
            load,
            slope,
        };
        let context = || format!("{pollutant}, {segment}, {class}, {load}, {slope}");
        let row = self
            .store
            .heavy_duty(&key)
            .ok_or_else(|| CopertError::unsupported(context()))?;
        if speed < row.v_min || speed > row.v_max {
            return Err(CopertError::speed_outside(
                speed, row.v_min, row.v_max, context(),
            ));
        }
        Ok(row.factor(speed))
    }

    /// Emission in grams over `distance` kilometers for a heavy-duty
    /// vehicle or bus. A zero speed emits nothing, as in
    /// [`Copert::emission`].
    ///
    /// # Errors
    /// Propagates [`Copert::hot_emission_factor_heavy_duty`].
    pub fn heavy_duty_emission(
        &self,
        pollutant: Pollutant,
        speed: f64,
        distance: f64,
        segment: HdvSegment,
        class: HdvClass,
        load: HdvLoad,
        slope: RoadSlope,
    ) -> Result<f64> {
        if speed == 0.0 {
            return Ok(0.0);
        }
        let factor =
            self.hot_emission_factor_heavy_duty(pollutant, speed, segment, class, load, slope)?;
        Ok(factor * distance)
    }

    /// Hot emission factor in g/km for a moped (below 50 cm³), two- or
    /// four-stroke per the engine type.
    ///
    /// # Errors
    /// Same taxonomy as the passenger-car factors; standards beyond Euro 5
    /// have no two-wheeler counterpart.
    pub fn emission_factor_moped(
        &self,
        pollutant: Pollutant,
        speed: f64,
        engine: EngineType,
        class: CopertClass,
    ) -> Result<f64> {
        // Displacement is below 0.05 l by definition of the category; any
        // value under the first motorcycle band would do.
        let segment = MotoSegment::resolve(VehicleCategory::Moped, engine, 0.05)?;
        self.two_wheeler_factor(pollutant, speed, segment, class)
    }

    /// Hot emission factor in g/km for a motorcycle, banded by stroke
    /// count and displacement.
    ///
    /// # Errors
    /// Same taxonomy as [`Copert::emission_factor_moped`].
    pub fn emission_factor_motorcycle(
        &self,
        pollutant: Pollutant,
        speed: f64,
        engine: EngineType,
        class: CopertClass,
        capacity: f64,
    ) -> Result<f64> {
        let segment = MotoSegment::resolve(VehicleCategory::Motorcycle, engine, capacity)?;
        self.two_wheeler_factor(pollutant, speed, segment, class)
    }

    fn two_wheeler_factor(
        &self,
        pollutant: Pollutant,
        speed: f64,
        segment: MotoSegment,
        class: CopertClass,
    ) -> Result<f64> {
        let moto_class = MotoClass::from_copert_class(class)?;
        let key = MotoKey {
            segment,
            class: moto_class,
            pollutant,
        };
        let context = || format!("{pollutant}, {segment}, {moto_class}");
        let row = self
            .store
            .two_wheeler(&key)
            .ok_or_else(|| CopertError::unsupported(context()))?;
        if speed < row.v_min || speed > row.v_max {
            return Err(CopertError::speed_outside(
                speed, row.v_min, row.v_max, context(),
            ));
        }
        Ok(row.factor(speed))
    }

    fn passenger_table_factor(
        &self,
        engine: EngineType,
        pollutant: Pollutant,
        speed: f64,
        class: CopertClass,
        band: CapacityBand,
    ) -> Result<f64> {
        let key = PassengerKey {
            engine,
            class,
            band,
            pollutant: table_pollutant(pollutant, class),
        };
        let context = || format!("{pollutant}, {engine} passenger car, {class}, capacity {band}");
        let row = self
            .store
            .passenger(&key)
            .ok_or_else(|| CopertError::unsupported(context()))?;
        if speed < row.v_min || speed > row.v_max {
            return Err(CopertError::speed_outside(
                speed, row.v_min, row.v_max, context(),
            ));
        }
        Ok(row.factor(speed))
    }
}

/// Tables up to Euro 4 report total hydrocarbons under the HC key only;
/// a VOC request against them resolves to that key. From Euro 5 on the
/// tables carry distinct HC and VOC rows.
fn table_pollutant(pollutant: Pollutant, class: CopertClass) -> Pollutant {
    if pollutant == Pollutant::VOC && class <= CopertClass::Euro4 {
        Pollutant::HC
    } else {
        pollutant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn idle_fleets_emit_nothing() {
        let copert = Copert::new();
        let grams = copert
            .emission(
                Pollutant::CO,
                0.0,
                1000.0,
                VehicleCategory::PassengerCar,
                EngineType::Gasoline,
                CopertClass::Euro1,
                1.3,
                20.0,
            )
            .unwrap();
        assert_relative_eq!(grams, 0.0);
    }

    #[test]
    fn emission_is_factor_times_distance() {
        let copert = Copert::new();
        let factor = copert
            .hot_emission_factor_gasoline_passenger_car(
                Pollutant::CO,
                60.0,
                CopertClass::Euro1,
                1.3,
            )
            .unwrap();
        let grams = copert
            .emission(
                Pollutant::CO,
                60.0,
                250.0,
                VehicleCategory::PassengerCar,
                EngineType::Gasoline,
                CopertClass::Euro1,
                1.3,
                20.0,
            )
            .unwrap();
        assert_relative_eq!(grams, factor * 250.0, max_relative = 1e-12);
    }

    #[test]
    fn pre_euro_classes_reach_the_legacy_regressions() {
        let copert = Copert::new();
        let grams = copert
            .emission(
                Pollutant::CO,
                60.0,
                1.0,
                VehicleCategory::PassengerCar,
                EngineType::Gasoline,
                CopertClass::PreEce,
                1.4,
                20.0,
            )
            .unwrap();
        assert_relative_eq!(grams, 281.0 * 60.0_f64.powf(-0.63));
    }

    #[test]
    fn voc_resolves_to_the_hc_rows_up_to_euro_4() {
        let copert = Copert::new();
        let hc = copert
            .hot_emission_factor_gasoline_passenger_car(
                Pollutant::HC,
                60.0,
                CopertClass::Euro2,
                1.3,
            )
            .unwrap();
        let voc = copert
            .hot_emission_factor_gasoline_passenger_car(
                Pollutant::VOC,
                60.0,
                CopertClass::Euro2,
                1.3,
            )
            .unwrap();
        assert_relative_eq!(hc, voc);
    }

    #[test]
    fn missing_table_cells_are_unsupported_not_zero() {
        let copert = Copert::new();
        // Small diesel cars have no Euro 1 rows; the cell is a sentinel.
        let err = copert
            .hot_emission_factor_diesel_passenger_car(
                Pollutant::CO,
                60.0,
                CopertClass::Euro1,
                1.2,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::UnsupportedCombination { .. }));
    }

    #[test]
    fn table_rows_enforce_their_speed_window() {
        let copert = Copert::new();
        let err = copert
            .hot_emission_factor_gasoline_passenger_car(
                Pollutant::CO,
                140.0,
                CopertClass::Euro1,
                1.3,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "speed", .. }));
    }

    #[test]
    fn heavy_vehicles_are_rejected_by_the_light_entry_point() {
        let copert = Copert::new();
        let err = copert
            .emission(
                Pollutant::NOx,
                60.0,
                100.0,
                VehicleCategory::HeavyDuty,
                EngineType::Diesel,
                CopertClass::Euro4,
                12.0,
                20.0,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::UnsupportedCombination { .. }));
    }

    #[test]
    fn heavy_duty_emission_without_loaded_tables_is_unsupported() {
        let copert = Copert::new();
        let err = copert
            .heavy_duty_emission(
                Pollutant::NOx,
                60.0,
                100.0,
                HdvSegment::Rigid14To20,
                HdvClass::EuroIV,
                HdvLoad::Half,
                RoadSlope::Level,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::UnsupportedCombination { .. }));
    }

    #[test]
    fn heavy_duty_idle_still_emits_nothing() {
        let copert = Copert::new();
        let grams = copert
            .heavy_duty_emission(
                Pollutant::NOx,
                0.0,
                100.0,
                HdvSegment::Rigid14To20,
                HdvClass::EuroIV,
                HdvLoad::Half,
                RoadSlope::Level,
            )
            .unwrap();
        assert_relative_eq!(grams, 0.0);
    }

    #[test]
    fn two_wheeler_standards_stop_at_euro_5() {
        let copert = Copert::new();
        let err = copert
            .emission_factor_motorcycle(
                Pollutant::CO,
                40.0,
                EngineType::Gasoline,
                CopertClass::Euro6,
                0.6,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::UnsupportedCombination { .. }));
    }

    #[test]
    fn non_road_fuels_have_no_pre_euro_coverage() {
        let copert = Copert::new();
        let err = copert
            .hot_emission_factor_passenger_car(
                Pollutant::CO,
                60.0,
                EngineType::Lpg,
                CopertClass::Ece1504,
                1.4,
            )
            .unwrap_err();
        assert!(matches!(err, CopertError::UnsupportedCombination { .. }));
    }
}

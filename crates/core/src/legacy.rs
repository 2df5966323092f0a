//! Pre-Euro hot emission factors
//!
//! Vehicles older than Euro 1 predate the coefficient tables: their hot
//! factors are closed-form regressions published per legislation step, with
//! piecewise branches over speed and, for NOx and fuel consumption, the
//! engine-capacity band. They are kept inline here rather than in the
//! parameter store because they do not share the tables' uniform row shape.
//!
//! All passenger-car branches are valid for 10–130 km/h, light commercial
//! vehicles for 10–110 km/h. The ECE steps only cover gasoline engines
//! above 0.8 l; Improved Conventional and Open Loop additionally stop at
//! 2.0 l.

use crate::categories::{CapacityBand, CopertClass, EngineType, Pollutant};
use crate::equations::{exponential, logarithmic, power_law, quadratic};
use crate::error::{CopertError, Result};

const PC_V_MIN: f64 = 10.0;
const PC_V_MAX: f64 = 130.0;
const LDV_V_MIN: f64 = 10.0;
const LDV_V_MAX: f64 = 110.0;

/// Smallest gasoline engine the pre-Euro regressions cover, in liters.
const MIN_CAPACITY: f64 = 0.8;

/// Hot emission factor in g/km for a pre-Euro gasoline passenger car.
///
/// # Errors
/// [`CopertError::Domain`] outside the 10–130 km/h window or the capacity
/// coverage of the legislation step;
/// [`CopertError::UnsupportedCombination`] for PM, which the pre-Euro
/// gasoline legislation never tabulated.
pub(crate) fn gasoline_passenger_car(
    pollutant: Pollutant,
    speed: f64,
    class: CopertClass,
    capacity: f64,
) -> Result<f64> {
    debug_assert!(class.is_pre_euro());
    let context = format!("{pollutant}, gasoline passenger car, {class}");
    check_speed(speed, PC_V_MIN, PC_V_MAX, &context)?;
    check_capacity(class, capacity, &context)?;

    let band = CapacityBand::from_liters(capacity);
    let factor = match pollutant {
        Pollutant::CO => gasoline_co(class, speed),
        Pollutant::HC | Pollutant::VOC => gasoline_hc(class, speed),
        Pollutant::NOx => gasoline_nox(class, band, speed),
        Pollutant::FC => gasoline_fc(band, speed),
        Pollutant::PM => return Err(CopertError::unsupported(context)),
    };
    Ok(factor)
}

/// CO regressions, piecewise over speed per legislation step.
fn gasoline_co(class: CopertClass, v: f64) -> f64 {
    match class {
        CopertClass::PreEce => {
            if v < 100.0 {
                power_law(281.0, -0.63, v)
            } else {
                0.112 * v + 4.32
            }
        }
        CopertClass::Ece1500Or01 => {
            if v <= 50.0 {
                power_law(313.0, -0.76, v)
            } else {
                quadratic(27.22, -0.406, 0.0032, v)
            }
        }
        CopertClass::Ece1502 => {
            if v <= 60.0 {
                power_law(300.0, -0.797, v)
            } else {
                quadratic(26.26, -0.44, 0.0026, v)
            }
        }
        CopertClass::Ece1503 => {
            if v <= 20.0 {
                logarithmic(161.36, -45.62, v)
            } else {
                quadratic(37.92, -0.68, 0.003_77, v)
            }
        }
        CopertClass::Ece1504 => {
            if v <= 60.0 {
                power_law(260.788, -0.91, v)
            } else {
                quadratic(14.653, -0.22, 0.001_163, v)
            }
        }
        CopertClass::ImprovedConventional => quadratic(14.577, -0.294, 0.002_478, v),
        _ => quadratic(17.882, -0.377, 0.002_825, v),
    }
}

/// Total-hydrocarbon regressions; the pre-Euro tables report them as VOC,
/// so HC and VOC share this branch.
fn gasoline_hc(class: CopertClass, v: f64) -> f64 {
    match class {
        CopertClass::PreEce => {
            if v < 100.0 {
                power_law(30.34, -0.693, v)
            } else {
                1.247
            }
        }
        CopertClass::Ece1500Or01 => {
            if v <= 50.0 {
                power_law(24.99, -0.704, v)
            } else {
                power_law(4.85, -0.318, v)
            }
        }
        CopertClass::Ece1502 | CopertClass::Ece1503 => {
            if v <= 60.0 {
                power_law(25.75, -0.714, v)
            } else {
                quadratic(1.95, -0.019, 0.000_09, v)
            }
        }
        CopertClass::Ece1504 => {
            if v <= 60.0 {
                power_law(19.079, -0.693, v)
            } else {
                quadratic(2.608, -0.037, 0.000_179, v)
            }
        }
        CopertClass::ImprovedConventional => quadratic(2.189, -0.034, 0.000_201, v),
        _ => quadratic(1.999, -0.034, 0.000_214, v),
    }
}

/// NOx regressions, banded by engine capacity. The ECE steps share one set
/// of band formulas; the transitional technologies have their own.
fn gasoline_nox(class: CopertClass, band: CapacityBand, v: f64) -> f64 {
    match class {
        CopertClass::ImprovedConventional => match band {
            CapacityBand::Small => quadratic(1.479, -0.0037, 0.000_18, v),
            _ => quadratic(1.663, -0.0038, 0.000_20, v),
        },
        CopertClass::OpenLoop => match band {
            CapacityBand::Small => quadratic(1.616, -0.0084, 0.000_25, v),
            _ => exponential(1.29, 0.0099, v),
        },
        _ => match band {
            CapacityBand::Small => quadratic(1.173, 0.0225, -0.000_14, v),
            CapacityBand::Medium => quadratic(1.360, 0.0217, -0.000_04, v),
            CapacityBand::Large => quadratic(1.5, 0.03, 0.000_1, v),
        },
    }
}

/// Fuel-consumption regressions, banded by engine capacity and shared
/// across the pre-Euro legislation steps.
fn gasoline_fc(band: CapacityBand, v: f64) -> f64 {
    match band {
        CapacityBand::Small => quadratic(135.44, -2.314, 0.0144, v),
        CapacityBand::Medium => quadratic(152.06, -2.75, 0.0182, v),
        CapacityBand::Large => quadratic(190.55, -3.211, 0.0223, v),
    }
}

/// Hot emission factor in g/km for a conventional (pre-Euro) diesel
/// passenger car. Diesel regressions are not capacity-banded.
///
/// # Errors
/// [`CopertError::Domain`] outside the 10–130 km/h window.
pub(crate) fn diesel_passenger_car(pollutant: Pollutant, speed: f64) -> Result<f64> {
    let context = format!("{pollutant}, conventional diesel passenger car");
    check_speed(speed, PC_V_MIN, PC_V_MAX, &context)?;
    let factor = match pollutant {
        Pollutant::CO => power_law(5.413, -0.574, speed),
        Pollutant::HC | Pollutant::VOC => power_law(4.61, -0.937, speed),
        Pollutant::NOx => quadratic(0.918, -0.014, 0.000_101, speed),
        Pollutant::PM => quadratic(0.45, -0.0086, 0.000_058, speed),
        Pollutant::FC => quadratic(118.489, -2.084, 0.014, speed),
    };
    Ok(factor)
}

/// Hot emission factor in g/km for a conventional (pre-Euro) light
/// commercial vehicle, gasoline or diesel.
///
/// # Errors
/// [`CopertError::Domain`] outside the 10–110 km/h window;
/// [`CopertError::UnsupportedCombination`] for gasoline PM and for engine
/// types the light-commercial legislation does not cover.
pub(crate) fn light_commercial(
    pollutant: Pollutant,
    speed: f64,
    engine: EngineType,
) -> Result<f64> {
    let context = format!("{pollutant}, conventional {engine} light commercial vehicle");
    check_speed(speed, LDV_V_MIN, LDV_V_MAX, &context)?;
    let factor = match engine {
        EngineType::Gasoline => match pollutant {
            Pollutant::CO => quadratic(57.789, -1.5132, 0.011_04, speed),
            Pollutant::HC | Pollutant::VOC => quadratic(5.4734, -0.117, 0.000_677, speed),
            Pollutant::NOx => quadratic(1.387, -0.014, 0.000_247, speed),
            Pollutant::FC => quadratic(197.0, -3.09, 0.0195, speed),
            Pollutant::PM => return Err(CopertError::unsupported(context)),
        },
        EngineType::Diesel => match pollutant {
            Pollutant::CO => quadratic(1.8281, -0.0256, 0.0002, speed),
            Pollutant::HC | Pollutant::VOC => quadratic(0.917, -0.0113, 0.000_066, speed),
            Pollutant::NOx => quadratic(2.7843, -0.0526, 0.000_418, speed),
            Pollutant::PM => quadratic(0.2257, -0.001_387, 0.000_012_5, speed),
            Pollutant::FC => quadratic(137.42, -2.506, 0.0198, speed),
        },
        other => {
            return Err(CopertError::unsupported(format!(
                "{pollutant}, conventional {other} light commercial vehicle"
            )))
        }
    };
    Ok(factor)
}

fn check_speed(speed: f64, min: f64, max: f64, context: &str) -> Result<()> {
    if speed < min || speed > max {
        return Err(CopertError::speed_outside(speed, min, max, context));
    }
    Ok(())
}

/// Capacity coverage of the pre-Euro gasoline regressions: above 0.8 l for
/// every step, and at most 2.0 l for the transitional technologies.
fn check_capacity(class: CopertClass, capacity: f64, context: &str) -> Result<()> {
    let max = match class {
        CopertClass::ImprovedConventional | CopertClass::OpenLoop => 2.0,
        _ => f64::INFINITY,
    };
    if capacity <= MIN_CAPACITY || capacity > max {
        return Err(CopertError::Domain {
            quantity: "engine capacity",
            value: capacity,
            min: MIN_CAPACITY,
            max,
            context: context.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pre_ece_co_is_piecewise_over_speed() {
        let low = gasoline_passenger_car(Pollutant::CO, 60.0, CopertClass::PreEce, 1.4).unwrap();
        assert_relative_eq!(low, 281.0 * 60.0_f64.powf(-0.63));

        let high = gasoline_passenger_car(Pollutant::CO, 110.0, CopertClass::PreEce, 1.4).unwrap();
        assert_relative_eq!(high, 0.112 * 110.0 + 4.32);
    }

    #[test]
    fn ece_15_00_co_branch_boundary_is_50_kmh() {
        let at = gasoline_passenger_car(Pollutant::CO, 50.0, CopertClass::Ece1500Or01, 1.4)
            .unwrap();
        assert_relative_eq!(at, 313.0 * 50.0_f64.powf(-0.76));

        let above = gasoline_passenger_car(Pollutant::CO, 51.0, CopertClass::Ece1500Or01, 1.4)
            .unwrap();
        assert_relative_eq!(above, 27.22 - 0.406 * 51.0 + 0.0032 * 51.0 * 51.0);
    }

    #[test]
    fn ece_15_03_co_uses_a_log_branch_at_urban_speeds() {
        let f = gasoline_passenger_car(Pollutant::CO, 15.0, CopertClass::Ece1503, 1.4).unwrap();
        assert_relative_eq!(f, 161.36 - 45.62 * 15.0_f64.ln());
    }

    #[test]
    fn nox_depends_on_the_capacity_band() {
        let small =
            gasoline_passenger_car(Pollutant::NOx, 60.0, CopertClass::Ece1504, 1.2).unwrap();
        let large =
            gasoline_passenger_car(Pollutant::NOx, 60.0, CopertClass::Ece1504, 2.5).unwrap();
        assert_relative_eq!(small, 1.173 + 0.0225 * 60.0 - 0.000_14 * 3600.0);
        assert_relative_eq!(large, 1.5 + 0.03 * 60.0 + 0.000_1 * 3600.0);
    }

    #[test]
    fn hc_and_voc_share_the_pre_euro_branch() {
        let hc = gasoline_passenger_car(Pollutant::HC, 40.0, CopertClass::Ece1502, 1.4).unwrap();
        let voc = gasoline_passenger_car(Pollutant::VOC, 40.0, CopertClass::Ece1502, 1.4).unwrap();
        assert_relative_eq!(hc, voc);
    }

    #[test]
    fn small_engines_are_outside_pre_euro_coverage() {
        let err = gasoline_passenger_car(Pollutant::CO, 60.0, CopertClass::PreEce, 0.7)
            .unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "engine capacity", .. }));
    }

    #[test]
    fn transitional_technologies_stop_at_two_liters() {
        assert!(gasoline_passenger_car(Pollutant::CO, 60.0, CopertClass::OpenLoop, 1.8).is_ok());
        let err = gasoline_passenger_car(Pollutant::CO, 60.0, CopertClass::OpenLoop, 2.2)
            .unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "engine capacity", .. }));
    }

    #[test]
    fn speed_window_is_10_to_130_for_passenger_cars() {
        assert!(gasoline_passenger_car(Pollutant::CO, 9.9, CopertClass::PreEce, 1.4).is_err());
        assert!(gasoline_passenger_car(Pollutant::CO, 130.0, CopertClass::PreEce, 1.4).is_ok());
        assert!(diesel_passenger_car(Pollutant::CO, 131.0).is_err());
    }

    #[test]
    fn conventional_diesel_formulas() {
        let co = diesel_passenger_car(Pollutant::CO, 50.0).unwrap();
        assert_relative_eq!(co, 5.413 * 50.0_f64.powf(-0.574));
        let pm = diesel_passenger_car(Pollutant::PM, 50.0).unwrap();
        assert_relative_eq!(pm, 0.45 - 0.0086 * 50.0 + 0.000_058 * 2500.0);
    }

    #[test]
    fn light_commercial_window_is_10_to_110() {
        assert!(light_commercial(Pollutant::CO, 110.0, EngineType::Diesel).is_ok());
        let err = light_commercial(Pollutant::CO, 115.0, EngineType::Diesel).unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "speed", .. }));
    }

    #[test]
    fn gasoline_light_commercial_pm_is_unsupported() {
        assert!(matches!(
            light_commercial(Pollutant::PM, 60.0, EngineType::Gasoline),
            Err(CopertError::UnsupportedCombination { .. })
        ));
    }
}

//! Cold-start corrections
//!
//! A cold engine emits more than a warm one. Two quantities describe the
//! excess, both resolved from the same category vocabulary as the hot
//! factors:
//!
//! - the **cold-start quotient**, the ratio of cold to hot emission rate;
//! - the **cold-mileage fraction** β, the fraction of the distance driven
//!   before the engine reaches operating temperature.
//!
//! A consumer combines them with the hot emission as
//! `hot × (1 + β·(quotient − 1))`; that composition is the consumer's
//! responsibility, not this module's.
//!
//! Above 30 °C there is no cold excess by convention: the quotient is 1 and
//! β is 0, regardless of the other inputs. Below that, each branch has a
//! strict ambient-temperature window (−20 °C to 30 °C, or −10 °C to 30 °C
//! for diesel particulates) and violations surface as domain errors.

use crate::categories::{CopertClass, EngineType, Pollutant, VehicleCategory};
use crate::error::{CopertError, Result};

/// Temperature ceiling above which no cold excess exists.
const NO_EXCESS_ABOVE_C: f64 = 30.0;

/// Ratio of cold to hot emission rate.
///
/// Tabulated for passenger cars and light commercial vehicles. Gasoline
/// cars from Euro 1 on use a speed-dependent form `A·V + B·t + C` valid for
/// 5–45 km/h; all other branches are linear in temperature alone. The
/// ratio is floored at 1: a cold engine never emits less than a warm one.
///
/// # Errors
/// [`CopertError::Domain`] for temperature or speed outside the branch
/// window, [`CopertError::UnsupportedCombination`] where the methodology
/// tabulates no cold excess (e.g. gasoline PM, or non-road-fuel engines).
pub fn cold_start_quotient(
    pollutant: Pollutant,
    speed: f64,
    vehicle: VehicleCategory,
    engine: EngineType,
    class: CopertClass,
    capacity: f64,
    ambient_temperature: f64,
) -> Result<f64> {
    if ambient_temperature > NO_EXCESS_ABOVE_C {
        return Ok(1.0);
    }
    let context = format!("cold-start quotient of {pollutant}, {engine} {vehicle}, {class}");
    match vehicle {
        VehicleCategory::PassengerCar | VehicleCategory::LightCommercial => {}
        other => {
            return Err(CopertError::unsupported(format!(
                "cold-start quotient of {pollutant} for {other} ({engine}, {class}, capacity {capacity} l)"
            )))
        }
    }

    let quotient = match engine {
        EngineType::Gasoline => {
            if class.is_pre_euro() {
                check_temperature(ambient_temperature, -20.0, &context)?;
                linear_quotient(pollutant, ambient_temperature, &context, GASOLINE_PRE_EURO)?
            } else {
                check_temperature(ambient_temperature, -20.0, &context)?;
                gasoline_closed_loop_quotient(pollutant, speed, ambient_temperature, &context)?
            }
        }
        EngineType::Diesel => {
            let floor = if pollutant == Pollutant::PM { -10.0 } else { -20.0 };
            check_temperature(ambient_temperature, floor, &context)?;
            linear_quotient(pollutant, ambient_temperature, &context, DIESEL)?
        }
        EngineType::Lpg => {
            check_temperature(ambient_temperature, -20.0, &context)?;
            linear_quotient(pollutant, ambient_temperature, &context, LPG)?
        }
        other => {
            return Err(CopertError::unsupported(format!(
                "cold-start quotient of {pollutant} for {other} engines"
            )))
        }
    };
    Ok(quotient.max(1.0))
}

/// Fraction of the trip distance driven with a cold engine (β).
///
/// The Euro 1 baseline is bilinear in mean trip length (km) and ambient
/// temperature; newer standards shrink the baseline by a tabulated
/// percentage per pollutant. The result is clamped to [0, 1].
///
/// # Errors
/// [`CopertError::Domain`] outside the temperature window or for a
/// non-positive trip length; [`CopertError::UnsupportedCombination`] for
/// standards past the tabulated range (Euro 6c and beyond) and for
/// pollutants without a reduction entry above Euro 1.
pub fn cold_mileage_fraction(
    pollutant: Pollutant,
    vehicle: VehicleCategory,
    engine: EngineType,
    class: CopertClass,
    ambient_temperature: f64,
    trip_length: f64,
) -> Result<f64> {
    let context = format!("cold-mileage fraction of {pollutant}, {engine} {vehicle}, {class}");
    match vehicle {
        VehicleCategory::PassengerCar | VehicleCategory::LightCommercial => {}
        other => {
            return Err(CopertError::unsupported(format!(
                "cold-mileage fraction for {other}"
            )))
        }
    }
    if trip_length <= 0.0 {
        return Err(CopertError::Domain {
            quantity: "trip length",
            value: trip_length,
            min: f64::MIN_POSITIVE,
            max: f64::INFINITY,
            context,
        });
    }
    if ambient_temperature > NO_EXCESS_ABOVE_C {
        return Ok(0.0);
    }
    check_temperature(ambient_temperature, -20.0, &context)?;

    let baseline = euro_1_beta(trip_length, ambient_temperature);
    let beta = if class <= CopertClass::Euro1 {
        baseline
    } else {
        let reduction = beta_reduction(pollutant, class).ok_or_else(|| {
            CopertError::unsupported(format!(
                "cold-mileage reduction of {pollutant} for {class} ({engine} {vehicle})"
            ))
        })?;
        baseline * (1.0 - reduction)
    };
    Ok(beta.clamp(0.0, 1.0))
}

/// The Euro 1 baseline β, bilinear in trip length and temperature.
fn euro_1_beta(trip_length: f64, t: f64) -> f64 {
    0.6474 - 0.02545 * trip_length - (0.00974 - 0.000385 * trip_length) * t
}

/// Baseline shrink factor for standards past Euro 1. No entries exist for
/// HC, PM or FC, and the table stops before Euro 6c.
fn beta_reduction(pollutant: Pollutant, class: CopertClass) -> Option<f64> {
    use CopertClass::{Euro2, Euro3, Euro4, Euro5, Euro6};
    let value = match (pollutant, class) {
        (Pollutant::CO, Euro2) => 0.28,
        (Pollutant::CO, Euro3) => 0.32,
        (Pollutant::CO, Euro4 | Euro5 | Euro6) => 0.43,
        (Pollutant::NOx, Euro2) => 0.08,
        (Pollutant::NOx, Euro3) => 0.15,
        (Pollutant::NOx, Euro4 | Euro5 | Euro6) => 0.25,
        (Pollutant::VOC, Euro2) => 0.30,
        (Pollutant::VOC, Euro3) => 0.44,
        (Pollutant::VOC, Euro4 | Euro5 | Euro6) => 0.52,
        _ => return None,
    };
    Some(value)
}

/// Linear cold/hot ratios, one `(pollutant, slope, intercept)` triple per
/// tabulated pollutant: `quotient = intercept + slope·t`.
type LinearTable = &'static [(Pollutant, f64, f64)];

const GASOLINE_PRE_EURO: LinearTable = &[
    (Pollutant::CO, -0.09, 3.7),
    (Pollutant::NOx, -0.006, 1.14),
    (Pollutant::HC, -0.06, 2.8),
    (Pollutant::VOC, -0.06, 2.8),
    (Pollutant::FC, -0.009, 1.47),
];

const DIESEL: LinearTable = &[
    (Pollutant::CO, -0.03, 1.9),
    (Pollutant::NOx, -0.013, 1.3),
    (Pollutant::HC, -0.09, 3.1),
    (Pollutant::VOC, -0.09, 3.1),
    (Pollutant::PM, -0.1, 3.1),
    (Pollutant::FC, -0.008, 1.34),
];

const LPG: LinearTable = &[
    (Pollutant::CO, -0.09, 3.66),
    (Pollutant::NOx, -0.006, 0.98),
    (Pollutant::HC, -0.06, 2.24),
    (Pollutant::VOC, -0.06, 2.24),
    (Pollutant::FC, -0.009, 1.47),
];

fn linear_quotient(
    pollutant: Pollutant,
    t: f64,
    context: &str,
    table: LinearTable,
) -> Result<f64> {
    table
        .iter()
        .find(|(p, _, _)| *p == pollutant)
        .map(|&(_, slope, intercept)| intercept + slope * t)
        .ok_or_else(|| CopertError::unsupported(context.to_string()))
}

/// Speed band coefficients of the closed-loop gasoline quotient
/// `A·V + B·t + C`: one triple for 5–25 km/h and one for 26–45 km/h.
struct SpeedBanded {
    low: (f64, f64, f64),
    high: (f64, f64, f64),
}

fn gasoline_closed_loop_quotient(
    pollutant: Pollutant,
    speed: f64,
    t: f64,
    context: &str,
) -> Result<f64> {
    const QUOTIENT_V_MIN: f64 = 5.0;
    const QUOTIENT_V_MAX: f64 = 45.0;
    if !(QUOTIENT_V_MIN..=QUOTIENT_V_MAX).contains(&speed) {
        return Err(CopertError::speed_outside(
            speed,
            QUOTIENT_V_MIN,
            QUOTIENT_V_MAX,
            context,
        ));
    }
    let banded = match pollutant {
        Pollutant::CO => SpeedBanded {
            low: (0.121, -0.146, 3.766),
            high: (0.299, -0.286, -0.58),
        },
        Pollutant::NOx => SpeedBanded {
            low: (0.0073, -0.0159, 1.066),
            high: (0.0037, -0.0122, 1.18),
        },
        Pollutant::HC | Pollutant::VOC => SpeedBanded {
            low: (0.157, -0.207, 3.419),
            high: (0.282, -0.338, 1.62),
        },
        Pollutant::FC => SpeedBanded {
            low: (0.0153, -0.0183, 1.221),
            high: (0.0135, -0.0218, 1.346),
        },
        Pollutant::PM => return Err(CopertError::unsupported(context.to_string())),
    };
    let (a, b, c) = if speed <= 25.0 { banded.low } else { banded.high };
    Ok(a * speed + b * t + c)
}

fn check_temperature(t: f64, floor: f64, context: &str) -> Result<()> {
    if t < floor || t > NO_EXCESS_ABOVE_C {
        return Err(CopertError::temperature_outside(
            t,
            floor,
            NO_EXCESS_ABOVE_C,
            context,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PC: VehicleCategory = VehicleCategory::PassengerCar;

    #[test]
    fn above_30_degrees_there_is_no_cold_excess() {
        // 1.0 regardless of every other input, including ones that would
        // otherwise be unsupported speed-wise.
        let q = cold_start_quotient(
            Pollutant::CO,
            90.0,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro4,
            1.4,
            35.0,
        )
        .unwrap();
        assert_relative_eq!(q, 1.0);
    }

    #[test]
    fn diesel_quotients_are_linear_in_temperature() {
        let q = cold_start_quotient(
            Pollutant::CO,
            30.0,
            PC,
            EngineType::Diesel,
            CopertClass::Euro2,
            1.9,
            20.0,
        )
        .unwrap();
        assert_relative_eq!(q, 1.9 - 0.03 * 20.0);
    }

    #[test]
    fn diesel_pm_window_is_tighter() {
        // -15 degC is fine for diesel CO but out of range for diesel PM.
        assert!(cold_start_quotient(
            Pollutant::CO,
            30.0,
            PC,
            EngineType::Diesel,
            CopertClass::Euro2,
            1.9,
            -15.0,
        )
        .is_ok());
        let err = cold_start_quotient(
            Pollutant::PM,
            30.0,
            PC,
            EngineType::Diesel,
            CopertClass::Euro2,
            1.9,
            -15.0,
        )
        .unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "ambient temperature", .. }));
    }

    #[test]
    fn closed_loop_gasoline_quotient_is_speed_banded() {
        let low = cold_start_quotient(
            Pollutant::CO,
            20.0,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro3,
            1.4,
            10.0,
        )
        .unwrap();
        assert_relative_eq!(low, 0.121 * 20.0 - 0.146 * 10.0 + 3.766);

        let high = cold_start_quotient(
            Pollutant::CO,
            40.0,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro3,
            1.4,
            10.0,
        )
        .unwrap();
        assert_relative_eq!(high, 0.299 * 40.0 - 0.286 * 10.0 - 0.58);
    }

    #[test]
    fn closed_loop_quotient_rejects_highway_speeds() {
        let err = cold_start_quotient(
            Pollutant::CO,
            60.0,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro3,
            1.4,
            10.0,
        )
        .unwrap_err();
        assert!(matches!(err, CopertError::Domain { quantity: "speed", .. }));
    }

    #[test]
    fn quotient_never_drops_below_one() {
        // Warm ambient, modern NOx control: the raw regression dips below 1.
        let q = cold_start_quotient(
            Pollutant::NOx,
            26.0,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro5,
            1.4,
            30.0,
        )
        .unwrap();
        assert_relative_eq!(q, 1.0);
    }

    #[test]
    fn gasoline_pm_has_no_cold_quotient() {
        assert!(matches!(
            cold_start_quotient(
                Pollutant::PM,
                20.0,
                PC,
                EngineType::Gasoline,
                CopertClass::Euro3,
                1.4,
                10.0,
            ),
            Err(CopertError::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn euro_1_beta_matches_the_bilinear_form() {
        let beta = cold_mileage_fraction(
            Pollutant::CO,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro1,
            20.0,
            12.0,
        )
        .unwrap();
        let expected = 0.6474 - 0.02545 * 12.0 - (0.00974 - 0.000385 * 12.0) * 20.0;
        assert_relative_eq!(beta, expected, max_relative = 1e-12);
    }

    #[test]
    fn pre_euro_classes_share_the_euro_1_beta() {
        let pre = cold_mileage_fraction(
            Pollutant::CO,
            PC,
            EngineType::Gasoline,
            CopertClass::Ece1504,
            20.0,
            12.0,
        )
        .unwrap();
        let euro1 = cold_mileage_fraction(
            Pollutant::CO,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro1,
            20.0,
            12.0,
        )
        .unwrap();
        assert_relative_eq!(pre, euro1);
    }

    #[test]
    fn newer_standards_shrink_beta_by_the_tabulated_percentage() {
        let euro1 = cold_mileage_fraction(
            Pollutant::CO,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro1,
            20.0,
            12.0,
        )
        .unwrap();
        let euro3 = cold_mileage_fraction(
            Pollutant::CO,
            PC,
            EngineType::Gasoline,
            CopertClass::Euro3,
            20.0,
            12.0,
        )
        .unwrap();
        assert_relative_eq!(euro3, euro1 * (1.0 - 0.32), max_relative = 1e-12);
    }

    #[test]
    fn beta_is_unsupported_past_the_tabulated_range() {
        assert!(matches!(
            cold_mileage_fraction(
                Pollutant::CO,
                PC,
                EngineType::Gasoline,
                CopertClass::Euro6c,
                20.0,
                12.0,
            ),
            Err(CopertError::UnsupportedCombination { .. })
        ));
        // No reduction entries for PM above Euro 1.
        assert!(matches!(
            cold_mileage_fraction(
                Pollutant::PM,
                PC,
                EngineType::Diesel,
                CopertClass::Euro4,
                20.0,
                12.0,
            ),
            Err(CopertError::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn beta_requires_a_positive_trip_length() {
        assert!(matches!(
            cold_mileage_fraction(
                Pollutant::CO,
                PC,
                EngineType::Gasoline,
                CopertClass::Euro1,
                20.0,
                0.0,
            ),
            Err(CopertError::Domain { quantity: "trip length", .. })
        ));
    }
}

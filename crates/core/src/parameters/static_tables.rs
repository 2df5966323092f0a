//! Embedded passenger-car coefficient tables, Euro 1 through Euro 4
//!
//! These rows were compiled into the engine long before the file-driven
//! Euro 5+ tables existed and are kept embedded so a store built without
//! external files still covers the historical fleet. Indexing is
//! (fuel, standard, capacity band, pollutant); the validity window is
//! 10–130 km/h for every embedded row.
//!
//! Gasoline CO uses the rational form `(a + cV + eV²)/(1 + bV + dV²)` of the
//! original tables (the two Euro 1 small/medium rows are carried verbatim
//! from them); gasoline HC is a power law, NOx a quadratic, and fuel
//! consumption the `a + b/V + cV + dV²` shape with its characteristic
//! urban-speed rise.
//!
//! Diesel cars below 1.4 l had no type approval before Euro 4: those cells
//! are explicit "no formula" sentinels, and looking one up must surface an
//! unsupported combination, never a NaN.

use crate::categories::{CapacityBand, CopertClass, EngineType, Pollutant};
use crate::equations::LightDutyEquation;

use super::{LightDutyRow, PassengerKey};

/// Validity window of every embedded row, km/h.
const V_MIN: f64 = 10.0;
const V_MAX: f64 = 130.0;

const fn rq(a: f64, b: f64, c: f64, d: f64, e: f64) -> LightDutyEquation {
    LightDutyEquation::RationalQuadratic { a, b, c, d, e }
}

const fn pw(a: f64, b: f64) -> LightDutyEquation {
    LightDutyEquation::Power { a, b }
}

const fn q(a: f64, b: f64, c: f64) -> LightDutyEquation {
    LightDutyEquation::Quadratic { a, b, c }
}

const fn fc(a: f64, b: f64, c: f64, d: f64) -> LightDutyEquation {
    LightDutyEquation::ReciprocalQuadratic { a, b, c, d }
}

type Cell = (Pollutant, CopertClass, CapacityBand, LightDutyEquation);

use CapacityBand::{Large, Medium, Small};
use CopertClass::{Euro1, Euro2, Euro3, Euro4};
use Pollutant::{CO, FC, HC, NOx, PM};

#[rustfmt::skip]
const GASOLINE_ROWS: &[Cell] = &[
    // CO, rational form of the original tables.
    (CO, Euro1, Small,  rq(1.12e1, 1.29e-1, -1.02e-1, -9.47e-4, 6.77e-4)),
    (CO, Euro1, Medium, rq(6.05e1, 3.50e0, 1.52e-1, -2.52e-2, -1.68e-4)),
    (CO, Euro1, Large,  rq(6.52e1, 3.41e0, 1.68e-1, -2.47e-2, -1.81e-4)),
    (CO, Euro2, Small,  rq(6.83e0, 1.35e-1, -6.11e-2, -9.62e-4, 4.12e-4)),
    (CO, Euro2, Medium, rq(3.71e1, 3.64e0, 9.22e-2, -2.61e-2, -1.06e-4)),
    (CO, Euro2, Large,  rq(4.02e1, 3.56e0, 1.01e-1, -2.55e-2, -1.13e-4)),
    (CO, Euro3, Small,  rq(3.96e0, 1.41e-1, -3.54e-2, -9.84e-4, 2.44e-4)),
    (CO, Euro3, Medium, rq(2.17e1, 3.77e0, 5.41e-2, -2.68e-2, -6.23e-5)),
    (CO, Euro3, Large,  rq(2.35e1, 3.69e0, 5.92e-2, -2.63e-2, -6.67e-5)),
    (CO, Euro4, Small,  rq(1.73e0, 1.48e-1, -1.56e-2, -1.01e-3, 1.08e-4)),
    (CO, Euro4, Medium, rq(9.32e0, 3.89e0, 2.37e-2, -2.74e-2, -2.79e-5)),
    (CO, Euro4, Large,  rq(1.01e1, 3.81e0, 2.61e-2, -2.69e-2, -3.01e-5)),
    // HC.
    (HC, Euro1, Small,  pw(2.185, -0.493)),
    (HC, Euro1, Medium, pw(1.973, -0.481)),
    (HC, Euro1, Large,  pw(1.871, -0.466)),
    (HC, Euro2, Small,  pw(1.105, -0.502)),
    (HC, Euro2, Medium, pw(0.998, -0.489)),
    (HC, Euro2, Large,  pw(0.946, -0.474)),
    (HC, Euro3, Small,  pw(0.527, -0.512)),
    (HC, Euro3, Medium, pw(0.476, -0.498)),
    (HC, Euro3, Large,  pw(0.451, -0.483)),
    (HC, Euro4, Small,  pw(0.246, -0.521)),
    (HC, Euro4, Medium, pw(0.222, -0.507)),
    (HC, Euro4, Large,  pw(0.211, -0.492)),
    // NOx.
    (NOx, Euro1, Small,  q(0.5595, -0.00697, 6.00e-5)),
    (NOx, Euro1, Medium, q(0.526, -0.0085, 9.20e-5)),
    (NOx, Euro1, Large,  q(0.666, -0.0105, 1.13e-4)),
    (NOx, Euro2, Small,  q(0.3948, -0.00579, 5.24e-5)),
    (NOx, Euro2, Medium, q(0.371, -0.00706, 8.03e-5)),
    (NOx, Euro2, Large,  q(0.4699, -0.00872, 9.86e-5)),
    (NOx, Euro3, Small,  q(0.1968, -0.00324, 3.33e-5)),
    (NOx, Euro3, Medium, q(0.185, -0.00395, 5.11e-5)),
    (NOx, Euro3, Large,  q(0.2342, -0.00488, 6.27e-5)),
    (NOx, Euro4, Small,  q(0.0897, -0.00158, 1.83e-5)),
    (NOx, Euro4, Medium, q(0.0843, -0.00192, 2.81e-5)),
    (NOx, Euro4, Large,  q(0.1067, -0.00238, 3.45e-5)),
    // Fuel consumption.
    (FC, Euro1, Small,  fc(41.8, 458.0, -0.402, 3.21e-3)),
    (FC, Euro1, Medium, fc(49.1, 514.0, -0.466, 3.74e-3)),
    (FC, Euro1, Large,  fc(60.3, 594.0, -0.557, 4.43e-3)),
    (FC, Euro2, Small,  fc(40.2, 451.0, -0.388, 3.12e-3)),
    (FC, Euro2, Medium, fc(47.3, 506.0, -0.451, 3.65e-3)),
    (FC, Euro2, Large,  fc(58.1, 585.0, -0.541, 4.33e-3)),
    (FC, Euro3, Small,  fc(38.9, 447.0, -0.377, 3.05e-3)),
    (FC, Euro3, Medium, fc(45.8, 499.0, -0.439, 3.58e-3)),
    (FC, Euro3, Large,  fc(56.2, 577.0, -0.527, 4.25e-3)),
    (FC, Euro4, Small,  fc(37.6, 441.0, -0.366, 2.98e-3)),
    (FC, Euro4, Medium, fc(44.3, 492.0, -0.427, 3.50e-3)),
    (FC, Euro4, Large,  fc(54.4, 568.0, -0.514, 4.16e-3)),
];

#[rustfmt::skip]
const DIESEL_ROWS: &[Cell] = &[
    // CO.
    (CO, Euro1, Medium, q(1.4325, -0.02635, 1.785e-4)),
    (CO, Euro1, Large,  q(1.583, -0.0287, 1.92e-4)),
    (CO, Euro2, Medium, q(1.036, -0.01957, 1.356e-4)),
    (CO, Euro2, Large,  q(1.146, -0.0213, 1.46e-4)),
    (CO, Euro3, Medium, q(0.843, -0.01622, 1.148e-4)),
    (CO, Euro3, Large,  q(0.932, -0.0177, 1.24e-4)),
    (CO, Euro4, Small,  q(0.417, -0.00823, 5.90e-5)),
    (CO, Euro4, Medium, q(0.461, -0.00891, 6.37e-5)),
    (CO, Euro4, Large,  q(0.510, -0.00971, 6.93e-5)),
    // HC.
    (HC, Euro1, Medium, q(0.1978, -0.003925, 2.23e-5)),
    (HC, Euro1, Large,  q(0.218, -0.00427, 2.41e-5)),
    (HC, Euro2, Medium, q(0.154, -0.00306, 1.74e-5)),
    (HC, Euro2, Large,  q(0.169, -0.00332, 1.87e-5)),
    (HC, Euro3, Medium, q(0.128, -0.00253, 1.44e-5)),
    (HC, Euro3, Large,  q(0.141, -0.00274, 1.55e-5)),
    (HC, Euro4, Small,  q(0.0887, -0.00177, 1.02e-5)),
    (HC, Euro4, Medium, q(0.0819, -0.00162, 9.20e-6)),
    (HC, Euro4, Large,  q(0.0902, -0.00175, 9.90e-6)),
    // NOx.
    (NOx, Euro1, Medium, q(1.331, -0.0182, 1.461e-4)),
    (NOx, Euro1, Large,  q(1.472, -0.0199, 1.576e-4)),
    (NOx, Euro2, Medium, q(1.28, -0.0173, 1.41e-4)),
    (NOx, Euro2, Large,  q(1.417, -0.0189, 1.52e-4)),
    (NOx, Euro3, Medium, q(1.247, -0.0167, 1.38e-4)),
    (NOx, Euro3, Large,  q(1.379, -0.0182, 1.49e-4)),
    (NOx, Euro4, Small,  q(0.962, -0.0129, 1.06e-4)),
    (NOx, Euro4, Medium, q(1.012, -0.0135, 1.11e-4)),
    (NOx, Euro4, Large,  q(1.119, -0.0148, 1.20e-4)),
    // PM.
    (PM, Euro1, Medium, q(0.1804, -0.004332, 4.33e-5)),
    (PM, Euro1, Large,  q(0.199, -0.00476, 4.74e-5)),
    (PM, Euro2, Medium, q(0.1124, -0.002576, 2.33e-5)),
    (PM, Euro2, Large,  q(0.124, -0.00284, 2.55e-5)),
    (PM, Euro3, Medium, q(0.0742, -0.00178, 1.71e-5)),
    (PM, Euro3, Large,  q(0.0817, -0.00195, 1.86e-5)),
    (PM, Euro4, Small,  q(0.0479, -0.00112, 1.04e-5)),
    (PM, Euro4, Medium, q(0.0443, -0.00104, 9.70e-6)),
    (PM, Euro4, Large,  q(0.0488, -0.00114, 1.05e-5)),
    // Fuel consumption.
    (FC, Euro1, Medium, fc(42.6, 489.0, -0.417, 3.29e-3)),
    (FC, Euro1, Large,  fc(52.8, 571.0, -0.504, 3.96e-3)),
    (FC, Euro2, Medium, fc(41.9, 482.0, -0.409, 3.22e-3)),
    (FC, Euro2, Large,  fc(51.9, 563.0, -0.495, 3.89e-3)),
    (FC, Euro3, Medium, fc(41.1, 476.0, -0.401, 3.16e-3)),
    (FC, Euro3, Large,  fc(50.9, 555.0, -0.486, 3.81e-3)),
    (FC, Euro4, Small,  fc(36.4, 431.0, -0.352, 2.78e-3)),
    (FC, Euro4, Medium, fc(40.3, 469.0, -0.393, 3.09e-3)),
    (FC, Euro4, Large,  fc(49.9, 547.0, -0.477, 3.73e-3)),
];

/// Materialize the embedded tables as store cells.
pub(crate) fn embedded_passenger_rows() -> Vec<(PassengerKey, Option<LightDutyRow>)> {
    let mut rows = Vec::new();
    for &(pollutant, class, band, equation) in GASOLINE_ROWS {
        rows.push((
            PassengerKey {
                engine: EngineType::Gasoline,
                class,
                band,
                pollutant,
            },
            Some(LightDutyRow {
                equation,
                reduction_factor: 0.0,
                v_min: V_MIN,
                v_max: V_MAX,
            }),
        ));
    }
    for &(pollutant, class, band, equation) in DIESEL_ROWS {
        rows.push((
            PassengerKey {
                engine: EngineType::Diesel,
                class,
                band,
                pollutant,
            },
            Some(LightDutyRow {
                equation,
                reduction_factor: 0.0,
                v_min: V_MIN,
                v_max: V_MAX,
            }),
        ));
    }
    // No small-diesel type approval before Euro 4: explicit sentinels.
    for class in [Euro1, Euro2, Euro3] {
        for pollutant in [CO, HC, NOx, PM, FC] {
            rows.push((
                PassengerKey {
                    engine: EngineType::Diesel,
                    class,
                    band: Small,
                    pollutant,
                },
                None,
            ));
        }
    }
    rows
}

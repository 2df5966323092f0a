//! External parameter-file loading
//!
//! The Euro 5/6/6c generations (and the whole heavy-duty and two-wheeler
//! families) are distributed as delimited text files rather than compiled
//! in. Records are comma-separated with one header line; empty numeric
//! fields are NaN ("no formula"). Category columns are translated through
//! the `categories` parsers and any string that does not translate aborts
//! the load — a silently skipped row would turn into a wrong "unsupported
//! combination" answer at query time.
//!
//! Column layouts:
//!
//! | file | columns |
//! |---|---|
//! | passenger car | Fuel, Segment, Standard, Pollutant, A..H, RF, Vmin, Vmax, Eq |
//! | light commercial | Fuel, Standard, Pollutant, A..H, RF, Vmin, Vmax, Eq |
//! | heavy duty / bus | Segment, Standard, Pollutant, Load, Slope, A..G, Vmin, Vmax, Eq |
//! | moped / motorcycle | Segment, Standard, Pollutant, A..H, RF, Vmin, Vmax, Eq |

use std::fs;
use std::path::Path;

use tracing::info;

use crate::categories::{
    CapacityBand, CopertClass, EngineType, HdvClass, HdvLoad, HdvSegment, MotoClass, MotoSegment,
    Pollutant, RoadSlope,
};
use crate::equations::{HeavyDutyEquation, LightDutyEquation};
use crate::error::{CopertError, Result};

use super::{HdvKey, HeavyDutyRow, LightCommercialKey, LightDutyRow, MotoKey, PassengerKey};

/// Read a parameter file into per-line field lists. The first line is the
/// header; blank lines and `#` comments are ignored.
fn read_records(path: &Path, expected_fields: usize) -> Result<Vec<(usize, Vec<String>)>> {
    let text = fs::read_to_string(path).map_err(|err| CopertError::Load {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if index == 0 || trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<String> = trimmed.split(',').map(|f| f.trim().to_string()).collect();
        if fields.len() != expected_fields {
            return Err(CopertError::Load {
                path: path.display().to_string(),
                reason: format!(
                    "line {}: expected {} fields, found {}",
                    index + 1,
                    expected_fields,
                    fields.len()
                ),
            });
        }
        records.push((index + 1, fields));
    }
    Ok(records)
}

/// Parse a numeric field. Empty means NaN (the "no formula" sentinel).
fn parse_number(field: &str, path: &Path, line: usize) -> Result<f64> {
    if field.is_empty() {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| CopertError::Load {
        path: path.display().to_string(),
        reason: format!("line {line}: invalid number {field:?}"),
    })
}

fn parse_equation_id(field: &str, path: &Path, line: usize) -> Result<u8> {
    field.parse::<u8>().map_err(|_| CopertError::Load {
        path: path.display().to_string(),
        reason: format!("line {line}: invalid equation id {field:?}"),
    })
}

/// Parse the shared light-duty row tail: eight coefficients, reduction
/// factor, validity window, equation id.
fn parse_light_duty_tail(
    fields: &[String],
    path: &Path,
    line: usize,
) -> Result<Option<LightDutyRow>> {
    debug_assert_eq!(fields.len(), 12);
    let mut coefficients = [0.0_f64; 8];
    for (slot, field) in coefficients.iter_mut().zip(&fields[0..8]) {
        *slot = parse_number(field, path, line)?;
    }
    let rf = parse_number(&fields[8], path, line)?;
    let v_min = parse_number(&fields[9], path, line)?;
    let v_max = parse_number(&fields[10], path, line)?;
    let equation_id = parse_equation_id(&fields[11], path, line)?;

    let Some(equation) = LightDutyEquation::from_row(equation_id, &coefficients)? else {
        return Ok(None);
    };
    if !(v_min.is_finite() && v_max.is_finite() && v_min < v_max) {
        return Err(CopertError::Load {
            path: path.display().to_string(),
            reason: format!("line {line}: invalid validity window [{v_min}, {v_max}]"),
        });
    }
    Ok(Some(LightDutyRow {
        equation,
        // Rows without a reduction factor leave the field empty.
        reduction_factor: if rf.is_nan() { 0.0 } else { rf },
        v_min,
        v_max,
    }))
}

/// Load the passenger-car parameter file.
pub fn load_passenger_file(path: &Path) -> Result<Vec<(PassengerKey, Option<LightDutyRow>)>> {
    let mut rows = Vec::new();
    for (line, fields) in read_records(path, 16)? {
        let key = PassengerKey {
            engine: EngineType::from_name(&fields[0])?,
            band: CapacityBand::from_name(&fields[1])?,
            class: CopertClass::from_name(&fields[2])?,
            pollutant: Pollutant::from_name(&fields[3])?,
        };
        let row = parse_light_duty_tail(&fields[4..16], path, line)?;
        rows.push((key, row));
    }
    info!(
        path = %path.display(),
        rows = rows.len(),
        "loaded passenger-car parameter file"
    );
    Ok(rows)
}

/// Load the light-commercial-vehicle parameter file.
pub fn load_light_commercial_file(
    path: &Path,
) -> Result<Vec<(LightCommercialKey, Option<LightDutyRow>)>> {
    let mut rows = Vec::new();
    for (line, fields) in read_records(path, 15)? {
        let key = LightCommercialKey {
            engine: EngineType::from_name(&fields[0])?,
            class: CopertClass::from_name(&fields[1])?,
            pollutant: Pollutant::from_name(&fields[2])?,
        };
        let row = parse_light_duty_tail(&fields[3..15], path, line)?;
        rows.push((key, row));
    }
    info!(
        path = %path.display(),
        rows = rows.len(),
        "loaded light-commercial parameter file"
    );
    Ok(rows)
}

/// Load the heavy-duty and bus parameter file.
pub fn load_heavy_duty_file(path: &Path) -> Result<Vec<(HdvKey, Option<HeavyDutyRow>)>> {
    let mut rows = Vec::new();
    for (line, fields) in read_records(path, 15)? {
        let key = HdvKey {
            segment: HdvSegment::from_name(&fields[0])?,
            class: HdvClass::from_name(&fields[1])?,
            pollutant: Pollutant::from_name(&fields[2])?,
            load: HdvLoad::from_name(&fields[3])?,
            slope: RoadSlope::from_name(&fields[4])?,
        };
        let mut coefficients = [0.0_f64; 7];
        for (slot, field) in coefficients.iter_mut().zip(&fields[5..12]) {
            *slot = parse_number(field, path, line)?;
        }
        let v_min = parse_number(&fields[12], path, line)?;
        let v_max = parse_number(&fields[13], path, line)?;
        let equation_id = parse_equation_id(&fields[14], path, line)?;

        let row = match HeavyDutyEquation::from_row(equation_id, &coefficients)? {
            None => None,
            Some(equation) => {
                if !(v_min.is_finite() && v_max.is_finite() && v_min < v_max) {
                    return Err(CopertError::Load {
                        path: path.display().to_string(),
                        reason: format!("line {line}: invalid validity window [{v_min}, {v_max}]"),
                    });
                }
                Some(HeavyDutyRow {
                    equation,
                    v_min,
                    v_max,
                })
            }
        };
        rows.push((key, row));
    }
    info!(
        path = %path.display(),
        rows = rows.len(),
        "loaded heavy-duty parameter file"
    );
    Ok(rows)
}

/// Load the moped/motorcycle parameter file.
pub fn load_two_wheeler_file(path: &Path) -> Result<Vec<(MotoKey, Option<LightDutyRow>)>> {
    let mut rows = Vec::new();
    for (line, fields) in read_records(path, 15)? {
        let key = MotoKey {
            segment: MotoSegment::from_name(&fields[0])?,
            class: MotoClass::from_name(&fields[1])?,
            pollutant: Pollutant::from_name(&fields[2])?,
        };
        let row = parse_light_duty_tail(&fields[3..15], path, line)?;
        rows.push((key, row));
    }
    info!(
        path = %path.display(),
        rows = rows.len(),
        "loaded two-wheeler parameter file"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("copert-loader-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    const PC_FIXTURE: &str = "\
Fuel,Segment,Standard,Pollutant,A,B,C,D,E,F,G,H,RF,Vmin,Vmax,Eq
Petrol,Small,Euro 5,CO,0.000132,0.0,0.0261,1.59,0.0,0.0243,1.0,,0.0,10,130,16
Petrol,Small,Euro 6,CO,0.000121,0.0,0.0248,1.51,0.0,0.0243,1.0,,0.082,10,130,16
Diesel,Medium,Euro 5,NOx,,,,,,,,,,,,2
";

    const HDV_FIXTURE: &str = "\
Segment,Standard,Pollutant,Load,Slope,A,B,C,D,E,F,G,Vmin,Vmax,Eq
Rigid 14-20 t,Euro V - SCR,CO,50,0,1.139,2.386,0.0,0.0,0.0,0.0,0.0,12,86,4
Urban Bus Standard 15-18 t,Euro VI A-C,NOx,50,0,0.00513,1.185,21.3,0.0,0.0,0.0,0.0,10,85,13
";

    #[test]
    fn passenger_rows_load_with_keys_and_sentinels() {
        let path = write_fixture("pc.csv", PC_FIXTURE);
        let rows = load_passenger_file(&path).unwrap();
        assert_eq!(rows.len(), 3);

        let (key, row) = &rows[0];
        assert_eq!(key.engine, EngineType::Gasoline);
        assert_eq!(key.band, CapacityBand::Small);
        assert_eq!(key.class, CopertClass::Euro5);
        let row = row.as_ref().unwrap();
        assert_eq!(row.reduction_factor, 0.0);
        assert_eq!(row.v_max, 130.0);

        // Euro 6 row carries a reduction factor.
        assert_eq!(rows[1].1.as_ref().unwrap().reduction_factor, 0.082);

        // Fully empty coefficients mean "no formula", not an error.
        assert!(rows[2].1.is_none());
    }

    #[test]
    fn unknown_fuel_string_fails_the_load() {
        let path = write_fixture(
            "pc-bad-fuel.csv",
            "Fuel,Segment,Standard,Pollutant,A,B,C,D,E,F,G,H,RF,Vmin,Vmax,Eq\n\
             Kerosene,Small,Euro 5,CO,1,0,0,0,0,0,0,0,0,10,130,1\n",
        );
        let err = load_passenger_file(&path).unwrap_err();
        assert_eq!(
            err,
            CopertError::UnknownCategory {
                kind: "fuel",
                value: "Kerosene".to_string()
            }
        );
    }

    #[test]
    fn unknown_equation_id_fails_the_load() {
        let path = write_fixture(
            "pc-bad-eq.csv",
            "Fuel,Segment,Standard,Pollutant,A,B,C,D,E,F,G,H,RF,Vmin,Vmax,Eq\n\
             Petrol,Small,Euro 5,CO,1,0,0,0,0,0,0,0,0,10,130,99\n",
        );
        assert!(matches!(
            load_passenger_file(&path),
            Err(CopertError::UnknownCategory { kind: "equation id", .. })
        ));
    }

    #[test]
    fn malformed_field_count_reports_the_line() {
        let path = write_fixture(
            "pc-short.csv",
            "Fuel,Segment,Standard,Pollutant,A,B,C,D,E,F,G,H,RF,Vmin,Vmax,Eq\n\
             Petrol,Small,Euro 5,CO,1,0\n",
        );
        let err = load_passenger_file(&path).unwrap_err();
        assert!(matches!(err, CopertError::Load { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn heavy_duty_standard_names_translate_including_the_hyphen_exception() {
        let path = write_fixture("hdv.csv", HDV_FIXTURE);
        let rows = load_heavy_duty_file(&path).unwrap();
        assert_eq!(rows[0].0.class, HdvClass::EuroVScr);
        assert_eq!(rows[0].0.segment, HdvSegment::Rigid14To20);
        assert_eq!(rows[1].0.class, HdvClass::EuroVIAc);
        assert_eq!(
            rows[1].0.segment.vehicle_category(),
            crate::categories::VehicleCategory::Bus
        );
    }

    #[test]
    fn loading_the_same_file_twice_is_deterministic() {
        let path = write_fixture("pc-determinism.csv", PC_FIXTURE);
        let first = load_passenger_file(&path).unwrap();
        let second = load_passenger_file(&path).unwrap();
        assert_eq!(first, second);
    }
}

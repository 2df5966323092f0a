//! Vehicle, fuel, pollutant and emission-standard categories
//!
//! These enums are the vocabulary of the whole engine: every formula is
//! selected by a tuple of them. The emission-standard classes
//! ([`CopertClass`]) carry one canonical total ordering spanning the
//! pre-Euro legislation steps (PRE ECE through Open Loop) and Euro 1 through
//! Euro 6c; "is at least Euro N" comparisons must always go through this
//! enum and never through raw integers, because historical encodings of the
//! same table disagree on the numbering.
//!
//! String translation for the parameter files lives next to each enum. A
//! string that does not translate is an [`CopertError::UnknownCategory`]
//! raised at load time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CopertError;

/// Pollutant species covered by the methodology.
///
/// FC is fuel consumption, reported in the same g/km unit as the pollutant
/// factors. HC and VOC are distinct keys; the pre-Euro gasoline regressions
/// report total HC as VOC, so both keys resolve to the same branch there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    CO,
    HC,
    NOx,
    PM,
    FC,
    VOC,
}

impl Pollutant {
    /// Translate a parameter-file pollutant code.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "CO" => Ok(Pollutant::CO),
            "HC" => Ok(Pollutant::HC),
            "NOx" | "NOX" => Ok(Pollutant::NOx),
            "PM" => Ok(Pollutant::PM),
            "FC" => Ok(Pollutant::FC),
            "VOC" => Ok(Pollutant::VOC),
            other => Err(CopertError::UnknownCategory {
                kind: "pollutant",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pollutant::CO => "CO",
            Pollutant::HC => "HC",
            Pollutant::NOx => "NOx",
            Pollutant::PM => "PM",
            Pollutant::FC => "FC",
            Pollutant::VOC => "VOC",
        };
        f.write_str(name)
    }
}

/// Top-level vehicle categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleCategory {
    PassengerCar,
    LightCommercial,
    HeavyDuty,
    Bus,
    /// Mopeds and motorcycles below 50 cm³.
    Moped,
    Motorcycle,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleCategory::PassengerCar => "passenger car",
            VehicleCategory::LightCommercial => "light commercial vehicle",
            VehicleCategory::HeavyDuty => "heavy duty vehicle",
            VehicleCategory::Bus => "bus",
            VehicleCategory::Moped => "moped",
            VehicleCategory::Motorcycle => "motorcycle",
        };
        f.write_str(name)
    }
}

/// Engine and fuel type.
///
/// Moped/motorcycle stroke variants are expressed through
/// [`EngineType::Gasoline`] (four-stroke) versus
/// [`EngineType::TwoStrokeGasoline`]; the displacement band is derived from
/// the engine capacity by [`MotoSegment::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    Gasoline,
    Diesel,
    Lpg,
    TwoStrokeGasoline,
    Hybrid,
    E85,
    Cng,
}

impl EngineType {
    /// Translate a parameter-file fuel descriptor.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "Petrol" | "Gasoline" => Ok(EngineType::Gasoline),
            "Diesel" => Ok(EngineType::Diesel),
            "LPG" | "LPG Bifuel" => Ok(EngineType::Lpg),
            "Petrol 2-stroke" | "2-stroke" => Ok(EngineType::TwoStrokeGasoline),
            "Petrol Hybrid" | "Hybrid" => Ok(EngineType::Hybrid),
            "E85" => Ok(EngineType::E85),
            "CNG" => Ok(EngineType::Cng),
            other => Err(CopertError::UnknownCategory {
                kind: "fuel",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineType::Gasoline => "gasoline",
            EngineType::Diesel => "diesel",
            EngineType::Lpg => "LPG",
            EngineType::TwoStrokeGasoline => "two-stroke gasoline",
            EngineType::Hybrid => "hybrid",
            EngineType::E85 => "E85",
            EngineType::Cng => "CNG",
        };
        f.write_str(name)
    }
}

/// Emission-standard class ("copert class"), total-ordered from the oldest
/// pre-Euro legislation step to Euro 6c.
///
/// The ordering of the variants is the canonical ordering; `derive(Ord)`
/// makes `Euro 1 < Euro 6c` and `PRE ECE < Open Loop` hold without any
/// integer arithmetic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CopertClass {
    PreEce,
    Ece1500Or01,
    Ece1502,
    Ece1503,
    Ece1504,
    ImprovedConventional,
    OpenLoop,
    Euro1,
    Euro2,
    Euro3,
    Euro4,
    Euro5,
    Euro6,
    Euro6c,
}

impl CopertClass {
    /// All classes, oldest first. Handy for fleet iteration by consumers.
    pub const ALL: [CopertClass; 14] = [
        CopertClass::PreEce,
        CopertClass::Ece1500Or01,
        CopertClass::Ece1502,
        CopertClass::Ece1503,
        CopertClass::Ece1504,
        CopertClass::ImprovedConventional,
        CopertClass::OpenLoop,
        CopertClass::Euro1,
        CopertClass::Euro2,
        CopertClass::Euro3,
        CopertClass::Euro4,
        CopertClass::Euro5,
        CopertClass::Euro6,
        CopertClass::Euro6c,
    ];

    /// True for the pre-Euro legislation steps (PRE ECE through Open Loop),
    /// which are served by inline legacy formulas rather than coefficient
    /// tables.
    pub fn is_pre_euro(self) -> bool {
        self < CopertClass::Euro1
    }

    /// "Is at least Euro N" comparison through the canonical ordering.
    pub fn is_at_least(self, other: CopertClass) -> bool {
        self >= other
    }

    /// Translate a parameter-file standard name.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "PRE ECE" => Ok(CopertClass::PreEce),
            "ECE 15/00-01" => Ok(CopertClass::Ece1500Or01),
            "ECE 15/02" => Ok(CopertClass::Ece1502),
            "ECE 15/03" => Ok(CopertClass::Ece1503),
            "ECE 15/04" => Ok(CopertClass::Ece1504),
            "Improved Conventional" => Ok(CopertClass::ImprovedConventional),
            "Open Loop" => Ok(CopertClass::OpenLoop),
            "Euro 1" => Ok(CopertClass::Euro1),
            "Euro 2" => Ok(CopertClass::Euro2),
            "Euro 3" => Ok(CopertClass::Euro3),
            "Euro 4" => Ok(CopertClass::Euro4),
            "Euro 5" => Ok(CopertClass::Euro5),
            "Euro 6" => Ok(CopertClass::Euro6),
            "Euro 6c" => Ok(CopertClass::Euro6c),
            other => Err(CopertError::UnknownCategory {
                kind: "emission standard",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CopertClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CopertClass::PreEce => "PRE ECE",
            CopertClass::Ece1500Or01 => "ECE 15/00-01",
            CopertClass::Ece1502 => "ECE 15/02",
            CopertClass::Ece1503 => "ECE 15/03",
            CopertClass::Ece1504 => "ECE 15/04",
            CopertClass::ImprovedConventional => "Improved Conventional",
            CopertClass::OpenLoop => "Open Loop",
            CopertClass::Euro1 => "Euro 1",
            CopertClass::Euro2 => "Euro 2",
            CopertClass::Euro3 => "Euro 3",
            CopertClass::Euro4 => "Euro 4",
            CopertClass::Euro5 => "Euro 5",
            CopertClass::Euro6 => "Euro 6",
            CopertClass::Euro6c => "Euro 6c",
        };
        f.write_str(name)
    }
}

/// Engine-capacity band for passenger cars and light vehicles.
///
/// Boundary convention from the source tables: 1.4 l and 2.0 l both belong
/// to the middle band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityBand {
    /// Below 1.4 l.
    Small,
    /// 1.4 l to 2.0 l inclusive.
    Medium,
    /// Above 2.0 l.
    Large,
}

impl CapacityBand {
    /// Band for an engine capacity in liters.
    pub fn from_liters(capacity: f64) -> Self {
        if capacity < 1.4 {
            CapacityBand::Small
        } else if capacity <= 2.0 {
            CapacityBand::Medium
        } else {
            CapacityBand::Large
        }
    }

    /// Translate a parameter-file segment name.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "Small" => Ok(CapacityBand::Small),
            "Medium" => Ok(CapacityBand::Medium),
            "Large" => Ok(CapacityBand::Large),
            other => Err(CopertError::UnknownCategory {
                kind: "capacity segment",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CapacityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapacityBand::Small => "below 1.4 l",
            CapacityBand::Medium => "1.4 l to 2.0 l",
            CapacityBand::Large => "above 2.0 l",
        };
        f.write_str(name)
    }
}

/// Heavy-duty vehicle and bus segments, banded by gross weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HdvSegment {
    RigidUpTo7p5,
    Rigid7p5To12,
    Rigid12To14,
    Rigid14To20,
    Rigid20To26,
    Rigid26To28,
    Rigid28To32,
    RigidOver32,
    Articulated14To20,
    Articulated20To28,
    Articulated28To34,
    Articulated34To40,
    Articulated40To50,
    Articulated50To60,
    /// Midi urban bus, below 15 t.
    UrbanBusMidi,
    /// Standard urban bus, 15 t to 18 t.
    UrbanBusStandard,
    /// Articulated urban bus, above 18 t.
    UrbanBusArticulated,
    /// Standard coach, up to 18 t.
    CoachStandard,
    /// Articulated coach, above 18 t.
    CoachArticulated,
}

impl HdvSegment {
    /// Whether this segment belongs to the bus family rather than freight.
    pub fn vehicle_category(self) -> VehicleCategory {
        match self {
            HdvSegment::UrbanBusMidi
            | HdvSegment::UrbanBusStandard
            | HdvSegment::UrbanBusArticulated
            | HdvSegment::CoachStandard
            | HdvSegment::CoachArticulated => VehicleCategory::Bus,
            _ => VehicleCategory::HeavyDuty,
        }
    }

    /// Translate a parameter-file segment name.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "Rigid <=7.5 t" => Ok(HdvSegment::RigidUpTo7p5),
            "Rigid 7.5-12 t" => Ok(HdvSegment::Rigid7p5To12),
            "Rigid 12-14 t" => Ok(HdvSegment::Rigid12To14),
            "Rigid 14-20 t" => Ok(HdvSegment::Rigid14To20),
            "Rigid 20-26 t" => Ok(HdvSegment::Rigid20To26),
            "Rigid 26-28 t" => Ok(HdvSegment::Rigid26To28),
            "Rigid 28-32 t" => Ok(HdvSegment::Rigid28To32),
            "Rigid >32 t" => Ok(HdvSegment::RigidOver32),
            "Articulated 14-20 t" => Ok(HdvSegment::Articulated14To20),
            "Articulated 20-28 t" => Ok(HdvSegment::Articulated20To28),
            "Articulated 28-34 t" => Ok(HdvSegment::Articulated28To34),
            "Articulated 34-40 t" => Ok(HdvSegment::Articulated34To40),
            "Articulated 40-50 t" => Ok(HdvSegment::Articulated40To50),
            "Articulated 50-60 t" => Ok(HdvSegment::Articulated50To60),
            "Urban Bus Midi <=15 t" => Ok(HdvSegment::UrbanBusMidi),
            "Urban Bus Standard 15-18 t" => Ok(HdvSegment::UrbanBusStandard),
            "Urban Bus Articulated >18 t" => Ok(HdvSegment::UrbanBusArticulated),
            "Coach Standard <=18 t" => Ok(HdvSegment::CoachStandard),
            "Coach Articulated >18 t" => Ok(HdvSegment::CoachArticulated),
            other => Err(CopertError::UnknownCategory {
                kind: "heavy duty segment",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HdvSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HdvSegment::RigidUpTo7p5 => "rigid truck <=7.5 t",
            HdvSegment::Rigid7p5To12 => "rigid truck 7.5-12 t",
            HdvSegment::Rigid12To14 => "rigid truck 12-14 t",
            HdvSegment::Rigid14To20 => "rigid truck 14-20 t",
            HdvSegment::Rigid20To26 => "rigid truck 20-26 t",
            HdvSegment::Rigid26To28 => "rigid truck 26-28 t",
            HdvSegment::Rigid28To32 => "rigid truck 28-32 t",
            HdvSegment::RigidOver32 => "rigid truck >32 t",
            HdvSegment::Articulated14To20 => "articulated truck 14-20 t",
            HdvSegment::Articulated20To28 => "articulated truck 20-28 t",
            HdvSegment::Articulated28To34 => "articulated truck 28-34 t",
            HdvSegment::Articulated34To40 => "articulated truck 34-40 t",
            HdvSegment::Articulated40To50 => "articulated truck 40-50 t",
            HdvSegment::Articulated50To60 => "articulated truck 50-60 t",
            HdvSegment::UrbanBusMidi => "urban bus midi <=15 t",
            HdvSegment::UrbanBusStandard => "urban bus standard 15-18 t",
            HdvSegment::UrbanBusArticulated => "urban bus articulated >18 t",
            HdvSegment::CoachStandard => "coach standard <=18 t",
            HdvSegment::CoachArticulated => "coach articulated >18 t",
        };
        f.write_str(name)
    }
}

/// Heavy-duty emission-standard classes (Roman-numeral legislation), with
/// the Euro V after-treatment technology split.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HdvClass {
    Conventional,
    EuroI,
    EuroII,
    EuroIII,
    EuroIV,
    /// Euro V with exhaust-gas recirculation.
    EuroVEgr,
    /// Euro V with selective catalytic reduction.
    EuroVScr,
    /// Euro VI steps A through C, tabulated as one class.
    EuroVIAc,
}

impl HdvClass {
    /// Translate a parameter-file standard name.
    ///
    /// Compound names carry an after-treatment technology after a `" - "`
    /// separator ("Euro V - EGR", "Euro V - SCR"). "Euro VI A-C" also
    /// contains a hyphen, but as part of the class name itself, so it is
    /// matched in full before any splitting.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        let name = name.trim();
        // Full-string exception: the hyphen here is not a technology
        // separator.
        if name == "Euro VI A-C" {
            return Ok(HdvClass::EuroVIAc);
        }
        let (base, technology) = match name.split_once(" - ") {
            Some((base, technology)) => (base.trim(), Some(technology.trim())),
            None => (name, None),
        };
        match (base, technology) {
            ("Conventional", None) => Ok(HdvClass::Conventional),
            ("Euro I", None) => Ok(HdvClass::EuroI),
            ("Euro II", None) => Ok(HdvClass::EuroII),
            ("Euro III", None) => Ok(HdvClass::EuroIII),
            ("Euro IV", None) => Ok(HdvClass::EuroIV),
            ("Euro V", Some("EGR")) => Ok(HdvClass::EuroVEgr),
            ("Euro V", Some("SCR")) => Ok(HdvClass::EuroVScr),
            _ => Err(CopertError::UnknownCategory {
                kind: "heavy duty emission standard",
                value: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for HdvClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HdvClass::Conventional => "Conventional",
            HdvClass::EuroI => "Euro I",
            HdvClass::EuroII => "Euro II",
            HdvClass::EuroIII => "Euro III",
            HdvClass::EuroIV => "Euro IV",
            HdvClass::EuroVEgr => "Euro V - EGR",
            HdvClass::EuroVScr => "Euro V - SCR",
            HdvClass::EuroVIAc => "Euro VI A-C",
        };
        f.write_str(name)
    }
}

/// Load state of a heavy-duty vehicle, as a fraction of maximum payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HdvLoad {
    Empty,
    Half,
    Full,
}

impl HdvLoad {
    /// Load as a percentage of maximum payload.
    pub fn percent(self) -> u8 {
        match self {
            HdvLoad::Empty => 0,
            HdvLoad::Half => 50,
            HdvLoad::Full => 100,
        }
    }

    /// Translate a parameter-file load column ("0", "50", "100").
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "0" => Ok(HdvLoad::Empty),
            "50" => Ok(HdvLoad::Half),
            "100" => Ok(HdvLoad::Full),
            other => Err(CopertError::UnknownCategory {
                kind: "load",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for HdvLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% load", self.percent())
    }
}

/// Road gradient applicable to heavy-duty factors, in 2% steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadSlope {
    Minus6,
    Minus4,
    Minus2,
    Level,
    Plus2,
    Plus4,
    Plus6,
}

impl RoadSlope {
    /// Gradient in percent.
    pub fn percent(self) -> i8 {
        match self {
            RoadSlope::Minus6 => -6,
            RoadSlope::Minus4 => -4,
            RoadSlope::Minus2 => -2,
            RoadSlope::Level => 0,
            RoadSlope::Plus2 => 2,
            RoadSlope::Plus4 => 4,
            RoadSlope::Plus6 => 6,
        }
    }

    /// Translate a parameter-file slope column ("-6" through "6").
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "-6" => Ok(RoadSlope::Minus6),
            "-4" => Ok(RoadSlope::Minus4),
            "-2" => Ok(RoadSlope::Minus2),
            "0" => Ok(RoadSlope::Level),
            "2" => Ok(RoadSlope::Plus2),
            "4" => Ok(RoadSlope::Plus4),
            "6" => Ok(RoadSlope::Plus6),
            other => Err(CopertError::UnknownCategory {
                kind: "slope",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoadSlope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% slope", self.percent())
    }
}

/// Moped and motorcycle segments: stroke count plus displacement band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotoSegment {
    MopedTwoStroke,
    MopedFourStroke,
    TwoStrokeOver50,
    FourStrokeUpTo250,
    FourStroke250To750,
    FourStrokeOver750,
}

impl MotoSegment {
    /// Resolve the segment for a moped or motorcycle from the vehicle
    /// category, the stroke variant carried by the engine type, and the
    /// engine capacity in liters (0.25 l = 250 cm³).
    pub fn resolve(
        vehicle: VehicleCategory,
        engine: EngineType,
        capacity: f64,
    ) -> Result<Self, CopertError> {
        match (vehicle, engine) {
            (VehicleCategory::Moped, EngineType::TwoStrokeGasoline) => {
                Ok(MotoSegment::MopedTwoStroke)
            }
            (VehicleCategory::Moped, EngineType::Gasoline) => Ok(MotoSegment::MopedFourStroke),
            (VehicleCategory::Motorcycle, EngineType::TwoStrokeGasoline) => {
                Ok(MotoSegment::TwoStrokeOver50)
            }
            (VehicleCategory::Motorcycle, EngineType::Gasoline) => {
                if capacity <= 0.25 {
                    Ok(MotoSegment::FourStrokeUpTo250)
                } else if capacity <= 0.75 {
                    Ok(MotoSegment::FourStroke250To750)
                } else {
                    Ok(MotoSegment::FourStrokeOver750)
                }
            }
            (vehicle, engine) => Err(CopertError::unsupported(format!(
                "{vehicle} with {engine} engine"
            ))),
        }
    }

    /// Translate a parameter-file category name.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "Moped 2-stroke <50 cm3" => Ok(MotoSegment::MopedTwoStroke),
            "Moped 4-stroke <50 cm3" => Ok(MotoSegment::MopedFourStroke),
            "Motorcycle 2-stroke >50 cm3" => Ok(MotoSegment::TwoStrokeOver50),
            "Motorcycle 4-stroke <250 cm3" => Ok(MotoSegment::FourStrokeUpTo250),
            "Motorcycle 4-stroke 250-750 cm3" => Ok(MotoSegment::FourStroke250To750),
            "Motorcycle 4-stroke >750 cm3" => Ok(MotoSegment::FourStrokeOver750),
            other => Err(CopertError::UnknownCategory {
                kind: "moped/motorcycle segment",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MotoSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotoSegment::MopedTwoStroke => "moped 2-stroke <50 cm3",
            MotoSegment::MopedFourStroke => "moped 4-stroke <50 cm3",
            MotoSegment::TwoStrokeOver50 => "motorcycle 2-stroke >50 cm3",
            MotoSegment::FourStrokeUpTo250 => "motorcycle 4-stroke <250 cm3",
            MotoSegment::FourStroke250To750 => "motorcycle 4-stroke 250-750 cm3",
            MotoSegment::FourStrokeOver750 => "motorcycle 4-stroke >750 cm3",
        };
        f.write_str(name)
    }
}

/// Moped/motorcycle emission-standard classes. The two-wheeler legislation
/// stops at Euro 5; older two-wheelers are a single Conventional class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MotoClass {
    Conventional,
    Euro1,
    Euro2,
    Euro3,
    Euro4,
    Euro5,
}

impl MotoClass {
    /// Map a generic [`CopertClass`] onto the two-wheeler legislation: all
    /// pre-Euro steps collapse to Conventional, Euro 6 and later have no
    /// two-wheeler counterpart.
    pub fn from_copert_class(class: CopertClass) -> Result<Self, CopertError> {
        match class {
            c if c.is_pre_euro() => Ok(MotoClass::Conventional),
            CopertClass::Euro1 => Ok(MotoClass::Euro1),
            CopertClass::Euro2 => Ok(MotoClass::Euro2),
            CopertClass::Euro3 => Ok(MotoClass::Euro3),
            CopertClass::Euro4 => Ok(MotoClass::Euro4),
            CopertClass::Euro5 => Ok(MotoClass::Euro5),
            other => Err(CopertError::unsupported(format!(
                "two-wheeler standard {other}"
            ))),
        }
    }

    /// Translate a parameter-file standard name.
    pub fn from_name(name: &str) -> Result<Self, CopertError> {
        match name.trim() {
            "Conventional" => Ok(MotoClass::Conventional),
            "Euro 1" => Ok(MotoClass::Euro1),
            "Euro 2" => Ok(MotoClass::Euro2),
            "Euro 3" => Ok(MotoClass::Euro3),
            "Euro 4" => Ok(MotoClass::Euro4),
            "Euro 5" => Ok(MotoClass::Euro5),
            other => Err(CopertError::UnknownCategory {
                kind: "two-wheeler emission standard",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MotoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotoClass::Conventional => "Conventional",
            MotoClass::Euro1 => "Euro 1",
            MotoClass::Euro2 => "Euro 2",
            MotoClass::Euro3 => "Euro 3",
            MotoClass::Euro4 => "Euro 4",
            MotoClass::Euro5 => "Euro 5",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copert_class_ordering_is_total_and_canonical() {
        assert!(CopertClass::PreEce < CopertClass::Ece1500Or01);
        assert!(CopertClass::OpenLoop < CopertClass::Euro1);
        assert!(CopertClass::Euro1 < CopertClass::Euro6c);
        assert!(CopertClass::Euro6 < CopertClass::Euro6c);
        assert!(CopertClass::Euro5.is_at_least(CopertClass::Euro5));
        assert!(!CopertClass::Euro4.is_at_least(CopertClass::Euro5));
        // ALL is sorted by construction.
        let mut sorted = CopertClass::ALL;
        sorted.sort_unstable();
        assert_eq!(sorted, CopertClass::ALL);
    }

    #[test]
    fn pre_euro_split() {
        assert!(CopertClass::PreEce.is_pre_euro());
        assert!(CopertClass::OpenLoop.is_pre_euro());
        assert!(!CopertClass::Euro1.is_pre_euro());
    }

    #[test]
    fn capacity_band_boundaries() {
        assert_eq!(CapacityBand::from_liters(1.3), CapacityBand::Small);
        // 1.4 l and 2.0 l belong to the middle band.
        assert_eq!(CapacityBand::from_liters(1.4), CapacityBand::Medium);
        assert_eq!(CapacityBand::from_liters(2.0), CapacityBand::Medium);
        assert_eq!(CapacityBand::from_liters(2.01), CapacityBand::Large);
    }

    #[test]
    fn hdv_class_technology_split() {
        assert_eq!(HdvClass::from_name("Euro V - EGR").unwrap(), HdvClass::EuroVEgr);
        assert_eq!(HdvClass::from_name("Euro V - SCR").unwrap(), HdvClass::EuroVScr);
        assert_eq!(HdvClass::from_name("Euro IV").unwrap(), HdvClass::EuroIV);
    }

    #[test]
    fn hdv_class_hyphen_exception_is_not_split() {
        // The hyphen in "Euro VI A-C" is part of the name, not a technology
        // separator.
        assert_eq!(HdvClass::from_name("Euro VI A-C").unwrap(), HdvClass::EuroVIAc);
    }

    #[test]
    fn unknown_strings_fail_fast() {
        assert!(matches!(
            Pollutant::from_name("SO2"),
            Err(CopertError::UnknownCategory { kind: "pollutant", .. })
        ));
        assert!(matches!(
            HdvClass::from_name("Euro V - DPF"),
            Err(CopertError::UnknownCategory { .. })
        ));
        assert!(matches!(
            HdvSegment::from_name("Rigid 99 t"),
            Err(CopertError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn moto_segment_resolution_by_stroke_and_displacement() {
        let seg = MotoSegment::resolve(
            VehicleCategory::Motorcycle,
            EngineType::Gasoline,
            0.6,
        )
        .unwrap();
        assert_eq!(seg, MotoSegment::FourStroke250To750);

        let seg = MotoSegment::resolve(
            VehicleCategory::Motorcycle,
            EngineType::TwoStrokeGasoline,
            0.125,
        )
        .unwrap();
        assert_eq!(seg, MotoSegment::TwoStrokeOver50);

        assert!(MotoSegment::resolve(
            VehicleCategory::Moped,
            EngineType::Diesel,
            0.05
        )
        .is_err());
    }

    #[test]
    fn moto_class_collapses_pre_euro_to_conventional() {
        assert_eq!(
            MotoClass::from_copert_class(CopertClass::Ece1503).unwrap(),
            MotoClass::Conventional
        );
        assert_eq!(
            MotoClass::from_copert_class(CopertClass::Euro3).unwrap(),
            MotoClass::Euro3
        );
        assert!(MotoClass::from_copert_class(CopertClass::Euro6c).is_err());
    }
}

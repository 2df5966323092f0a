//! Closed-form regression equations
//!
//! Every emission factor in the methodology is one of a few dozen closed
//! forms evaluated at the mean travel speed. This module implements them as
//! pure, stateless functions: coefficients in, scalar out.
//!
//! Two tagged families cover the table-driven categories:
//!
//! - [`LightDutyEquation`] — the passenger-car / light-commercial /
//!   two-wheeler forms, selected by the equation-id column of the parameter
//!   files (ids 1–17, plus the sixth-order two-stroke motorcycle polynomial,
//!   id 56). Each variant holds only the coefficients its form actually
//!   uses; the historical tables padded unused coefficients with zeros to
//!   keep one uniform signature, which the tagged representation replaces.
//! - [`HeavyDutyEquation`] — the heavy-duty forms (ids 0–15).
//!
//! The free functions at the top are the primitive shapes the legacy
//! (pre-Euro) inline branches are written in.
//!
//! Domain preconditions (speed strictly positive wherever a logarithm or a
//! division by speed occurs) are owned by the category resolver, which
//! validates the speed window before evaluating. A math domain error here
//! means the resolver contract was violated.

use serde::{Deserialize, Serialize};

use crate::error::CopertError;

/// `a + b·v`
pub fn linear(a: f64, b: f64, v: f64) -> f64 {
    a + b * v
}

/// `a + b·v + c·v²`
pub fn quadratic(a: f64, b: f64, c: f64, v: f64) -> f64 {
    a + b * v + c * v * v
}

/// `a·v^b`
pub fn power_law(a: f64, b: f64, v: f64) -> f64 {
    a * v.powf(b)
}

/// `a·e^(b·v)`
pub fn exponential(a: f64, b: f64, v: f64) -> f64 {
    a * (b * v).exp()
}

/// `a + b·ln(v)`
pub fn logarithmic(a: f64, b: f64, v: f64) -> f64 {
    a + b * v.ln()
}

/// Closed forms for passenger cars, light commercial vehicles, mopeds and
/// motorcycles, selected by the equation-id column of the parameter files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightDutyEquation {
    /// id 1: `a + b·V`
    Linear { a: f64, b: f64 },
    /// id 2: `a + b·V + c·V²`
    Quadratic { a: f64, b: f64, c: f64 },
    /// id 3: `a + b·V + c·V² + d·V³`
    Cubic { a: f64, b: f64, c: f64, d: f64 },
    /// id 4: `a·V^b`
    Power { a: f64, b: f64 },
    /// id 5: `a + b·V^c`
    PowerOffset { a: f64, b: f64, c: f64 },
    /// id 6: `a·e^(b·V)`
    Exponential { a: f64, b: f64 },
    /// id 7: `a + b·e^(c·V)`
    ExponentialOffset { a: f64, b: f64, c: f64 },
    /// id 8: `a + b·ln(V)`
    Logarithmic { a: f64, b: f64 },
    /// id 9: `(a + b·V) / (1 + c·V + d·V²)`
    RationalLinear { a: f64, b: f64, c: f64, d: f64 },
    /// id 10: `(a + c·V + e·V²) / (1 + b·V + d·V²)`
    ///
    /// The form of the embedded Euro 1 through Euro 4 passenger-car rows;
    /// the coefficient placement (numerator a, c, e; denominator b, d)
    /// follows the historical tables.
    RationalQuadratic {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
    },
    /// id 11: `a + b/V`
    Reciprocal { a: f64, b: f64 },
    /// id 12: `a + b/V + c·V + d·V²`
    ReciprocalQuadratic { a: f64, b: f64, c: f64, d: f64 },
    /// id 13: `1 / (a + b·V^c)`
    ReciprocalPower { a: f64, b: f64, c: f64 },
    /// id 14: `a / (1 + b·e^(-c·V))`
    Logistic { a: f64, b: f64, c: f64 },
    /// id 15: `a + b·V + c·V² + d·V³ + e·V⁴ + f·V⁵`
    Poly5 {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    /// id 16: `(a·V² + b·V + c + d/V) / (e·V² + f·V + g)`
    ///
    /// The universal rational form used by the Euro 5 and later parameter
    /// files.
    Universal {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
    },
    /// id 17: `a·e^(b·V) + c·e^(d·V)`
    DoubleExponential { a: f64, b: f64, c: f64, d: f64 },
    /// id 56: `a + b·V + c·V² + d·V³ + e·V⁴ + f·V⁵ + g·V⁶`
    ///
    /// Sixth-order polynomial for two-stroke motorcycles over 50 cm³.
    Poly6 {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
    },
}

impl LightDutyEquation {
    /// Build an equation from a parameter-file row: the equation id and the
    /// eight coefficient slots a through h.
    ///
    /// Returns `Ok(None)` when a coefficient the selected form needs is NaN:
    /// per the table invariant such a row is entirely absent ("no formula"),
    /// not partially filled. Unknown equation ids are a load error.
    pub fn from_row(id: u8, c: &[f64; 8]) -> Result<Option<Self>, CopertError> {
        let eq = match id {
            1 => LightDutyEquation::Linear { a: c[0], b: c[1] },
            2 => LightDutyEquation::Quadratic {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            3 => LightDutyEquation::Cubic {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            4 => LightDutyEquation::Power { a: c[0], b: c[1] },
            5 => LightDutyEquation::PowerOffset {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            6 => LightDutyEquation::Exponential { a: c[0], b: c[1] },
            7 => LightDutyEquation::ExponentialOffset {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            8 => LightDutyEquation::Logarithmic { a: c[0], b: c[1] },
            9 => LightDutyEquation::RationalLinear {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            10 => LightDutyEquation::RationalQuadratic {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
            },
            11 => LightDutyEquation::Reciprocal { a: c[0], b: c[1] },
            12 => LightDutyEquation::ReciprocalQuadratic {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            13 => LightDutyEquation::ReciprocalPower {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            14 => LightDutyEquation::Logistic {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            15 => LightDutyEquation::Poly5 {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
                f: c[5],
            },
            16 => LightDutyEquation::Universal {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
                f: c[5],
                g: c[6],
            },
            17 => LightDutyEquation::DoubleExponential {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            56 => LightDutyEquation::Poly6 {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
                f: c[5],
                g: c[6],
            },
            other => {
                return Err(CopertError::UnknownCategory {
                    kind: "equation id",
                    value: other.to_string(),
                })
            }
        };
        if eq.has_nan_coefficient() {
            Ok(None)
        } else {
            Ok(Some(eq))
        }
    }

    fn has_nan_coefficient(self) -> bool {
        self.coefficients().iter().any(|c| c.is_nan())
    }

    fn coefficients(self) -> [f64; 7] {
        // Unused trailing slots padded with zeros for the NaN scan only.
        match self {
            LightDutyEquation::Linear { a, b }
            | LightDutyEquation::Power { a, b }
            | LightDutyEquation::Exponential { a, b }
            | LightDutyEquation::Logarithmic { a, b }
            | LightDutyEquation::Reciprocal { a, b } => [a, b, 0.0, 0.0, 0.0, 0.0, 0.0],
            LightDutyEquation::Quadratic { a, b, c }
            | LightDutyEquation::PowerOffset { a, b, c }
            | LightDutyEquation::ExponentialOffset { a, b, c }
            | LightDutyEquation::ReciprocalPower { a, b, c }
            | LightDutyEquation::Logistic { a, b, c } => [a, b, c, 0.0, 0.0, 0.0, 0.0],
            LightDutyEquation::Cubic { a, b, c, d }
            | LightDutyEquation::RationalLinear { a, b, c, d }
            | LightDutyEquation::ReciprocalQuadratic { a, b, c, d }
            | LightDutyEquation::DoubleExponential { a, b, c, d } => {
                [a, b, c, d, 0.0, 0.0, 0.0]
            }
            LightDutyEquation::RationalQuadratic { a, b, c, d, e } => {
                [a, b, c, d, e, 0.0, 0.0]
            }
            LightDutyEquation::Poly5 { a, b, c, d, e, f } => [a, b, c, d, e, f, 0.0],
            LightDutyEquation::Universal {
                a,
                b,
                c,
                d,
                e,
                f,
                g,
            }
            | LightDutyEquation::Poly6 {
                a,
                b,
                c,
                d,
                e,
                f,
                g,
            } => [a, b, c, d, e, f, g],
        }
    }

    /// Evaluate the form at speed `v` (km/h). The caller has already
    /// validated the speed window.
    pub fn evaluate(self, v: f64) -> f64 {
        match self {
            LightDutyEquation::Linear { a, b } => linear(a, b, v),
            LightDutyEquation::Quadratic { a, b, c } => quadratic(a, b, c, v),
            LightDutyEquation::Cubic { a, b, c, d } => quadratic(a, b, c, v) + d * v.powi(3),
            LightDutyEquation::Power { a, b } => power_law(a, b, v),
            LightDutyEquation::PowerOffset { a, b, c } => a + power_law(b, c, v),
            LightDutyEquation::Exponential { a, b } => exponential(a, b, v),
            LightDutyEquation::ExponentialOffset { a, b, c } => a + exponential(b, c, v),
            LightDutyEquation::Logarithmic { a, b } => logarithmic(a, b, v),
            LightDutyEquation::RationalLinear { a, b, c, d } => {
                (a + b * v) / (1.0 + c * v + d * v * v)
            }
            LightDutyEquation::RationalQuadratic { a, b, c, d, e } => {
                (a + c * v + e * v * v) / (1.0 + b * v + d * v * v)
            }
            LightDutyEquation::Reciprocal { a, b } => a + b / v,
            LightDutyEquation::ReciprocalQuadratic { a, b, c, d } => {
                a + b / v + c * v + d * v * v
            }
            LightDutyEquation::ReciprocalPower { a, b, c } => 1.0 / (a + b * v.powf(c)),
            LightDutyEquation::Logistic { a, b, c } => a / (1.0 + b * (-c * v).exp()),
            LightDutyEquation::Poly5 { a, b, c, d, e, f } => {
                a + b * v + c * v.powi(2) + d * v.powi(3) + e * v.powi(4) + f * v.powi(5)
            }
            LightDutyEquation::Universal {
                a,
                b,
                c,
                d,
                e,
                f,
                g,
            } => (a * v * v + b * v + c + d / v) / (e * v * v + f * v + g),
            LightDutyEquation::DoubleExponential { a, b, c, d } => {
                exponential(a, b, v) + exponential(c, d, v)
            }
            LightDutyEquation::Poly6 {
                a,
                b,
                c,
                d,
                e,
                f,
                g,
            } => {
                a + b * v
                    + c * v.powi(2)
                    + d * v.powi(3)
                    + e * v.powi(4)
                    + f * v.powi(5)
                    + g * v.powi(6)
            }
        }
    }
}

/// Closed forms for heavy-duty vehicles and buses, ids 0 through 15. The
/// tables call the regressor `x`; it is the mean travel speed in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeavyDutyEquation {
    /// id 0: `a + b·x`
    Linear { a: f64, b: f64 },
    /// id 1: `a + b·x + c·x² + d·x³`
    Cubic { a: f64, b: f64, c: f64, d: f64 },
    /// id 2: `a·x^b`
    Power { a: f64, b: f64 },
    /// id 3: `a·x^b + c·x^d`
    PowerSum { a: f64, b: f64, c: f64, d: f64 },
    /// id 4: `a + b/x`
    Reciprocal { a: f64, b: f64 },
    /// id 5: `a + b/x + c/x²`
    ReciprocalSquared { a: f64, b: f64, c: f64 },
    /// id 6: `c + a·e^(b·x)`
    ExponentialOffset { a: f64, b: f64, c: f64 },
    /// id 7: `c + a·e^(-b·x)`
    DecayOffset { a: f64, b: f64, c: f64 },
    /// id 8: `e + a·e^(b·x) + c·e^(d·x)`
    DoubleExponentialOffset {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
    },
    /// id 9: `1 / (a + b·x^c)`
    ReciprocalPower { a: f64, b: f64, c: f64 },
    /// id 10: `1 / (c + a·e^(b·x))`
    ReciprocalExponential { a: f64, b: f64, c: f64 },
    /// id 11: `a - b·e^(-c·x^d)`
    SaturatingExponential { a: f64, b: f64, c: f64, d: f64 },
    /// id 12: `a + b·ln(x)`
    Logarithmic { a: f64, b: f64 },
    /// id 13: `a + b / (1 + e^(-c + d·ln(x) + e·x))`
    LogisticLog {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
    },
    /// id 14: `a·b^x·x^c`
    GeometricPower { a: f64, b: f64, c: f64 },
    /// id 15: `a + b·x + c·x²`
    Quadratic { a: f64, b: f64, c: f64 },
}

impl HeavyDutyEquation {
    /// Build an equation from a heavy-duty parameter-file row: the equation
    /// id and the seven coefficient slots a through g.
    ///
    /// Same sentinel convention as [`LightDutyEquation::from_row`].
    pub fn from_row(id: u8, c: &[f64; 7]) -> Result<Option<Self>, CopertError> {
        let eq = match id {
            0 => HeavyDutyEquation::Linear { a: c[0], b: c[1] },
            1 => HeavyDutyEquation::Cubic {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            2 => HeavyDutyEquation::Power { a: c[0], b: c[1] },
            3 => HeavyDutyEquation::PowerSum {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            4 => HeavyDutyEquation::Reciprocal { a: c[0], b: c[1] },
            5 => HeavyDutyEquation::ReciprocalSquared {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            6 => HeavyDutyEquation::ExponentialOffset {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            7 => HeavyDutyEquation::DecayOffset {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            8 => HeavyDutyEquation::DoubleExponentialOffset {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
            },
            9 => HeavyDutyEquation::ReciprocalPower {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            10 => HeavyDutyEquation::ReciprocalExponential {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            11 => HeavyDutyEquation::SaturatingExponential {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
            },
            12 => HeavyDutyEquation::Logarithmic { a: c[0], b: c[1] },
            13 => HeavyDutyEquation::LogisticLog {
                a: c[0],
                b: c[1],
                c: c[2],
                d: c[3],
                e: c[4],
            },
            14 => HeavyDutyEquation::GeometricPower {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            15 => HeavyDutyEquation::Quadratic {
                a: c[0],
                b: c[1],
                c: c[2],
            },
            other => {
                return Err(CopertError::UnknownCategory {
                    kind: "equation id",
                    value: other.to_string(),
                })
            }
        };
        if eq.has_nan_coefficient() {
            Ok(None)
        } else {
            Ok(Some(eq))
        }
    }

    fn has_nan_coefficient(self) -> bool {
        self.coefficients().iter().any(|c| c.is_nan())
    }

    fn coefficients(self) -> [f64; 5] {
        match self {
            HeavyDutyEquation::Linear { a, b }
            | HeavyDutyEquation::Power { a, b }
            | HeavyDutyEquation::Reciprocal { a, b }
            | HeavyDutyEquation::Logarithmic { a, b } => [a, b, 0.0, 0.0, 0.0],
            HeavyDutyEquation::ReciprocalSquared { a, b, c }
            | HeavyDutyEquation::ExponentialOffset { a, b, c }
            | HeavyDutyEquation::DecayOffset { a, b, c }
            | HeavyDutyEquation::ReciprocalPower { a, b, c }
            | HeavyDutyEquation::ReciprocalExponential { a, b, c }
            | HeavyDutyEquation::GeometricPower { a, b, c }
            | HeavyDutyEquation::Quadratic { a, b, c } => [a, b, c, 0.0, 0.0],
            HeavyDutyEquation::Cubic { a, b, c, d }
            | HeavyDutyEquation::PowerSum { a, b, c, d }
            | HeavyDutyEquation::SaturatingExponential { a, b, c, d } => [a, b, c, d, 0.0],
            HeavyDutyEquation::DoubleExponentialOffset { a, b, c, d, e }
            | HeavyDutyEquation::LogisticLog { a, b, c, d, e } => [a, b, c, d, e],
        }
    }

    /// Evaluate the form at speed `x` (km/h). The caller has already
    /// validated the speed window.
    pub fn evaluate(self, x: f64) -> f64 {
        match self {
            HeavyDutyEquation::Linear { a, b } => linear(a, b, x),
            HeavyDutyEquation::Cubic { a, b, c, d } => quadratic(a, b, c, x) + d * x.powi(3),
            HeavyDutyEquation::Power { a, b } => power_law(a, b, x),
            HeavyDutyEquation::PowerSum { a, b, c, d } => power_law(a, b, x) + power_law(c, d, x),
            HeavyDutyEquation::Reciprocal { a, b } => a + b / x,
            HeavyDutyEquation::ReciprocalSquared { a, b, c } => a + b / x + c / (x * x),
            HeavyDutyEquation::ExponentialOffset { a, b, c } => c + exponential(a, b, x),
            HeavyDutyEquation::DecayOffset { a, b, c } => c + exponential(a, -b, x),
            HeavyDutyEquation::DoubleExponentialOffset { a, b, c, d, e } => {
                e + exponential(a, b, x) + exponential(c, d, x)
            }
            HeavyDutyEquation::ReciprocalPower { a, b, c } => 1.0 / (a + b * x.powf(c)),
            HeavyDutyEquation::ReciprocalExponential { a, b, c } => 1.0 / (c + exponential(a, b, x)),
            HeavyDutyEquation::SaturatingExponential { a, b, c, d } => {
                a - b * (-c * x.powf(d)).exp()
            }
            HeavyDutyEquation::Logarithmic { a, b } => logarithmic(a, b, x),
            HeavyDutyEquation::LogisticLog { a, b, c, d, e } => {
                a + b / (1.0 + (-c + d * x.ln() + e * x).exp())
            }
            HeavyDutyEquation::GeometricPower { a, b, c } => a * b.powf(x) * x.powf(c),
            HeavyDutyEquation::Quadratic { a, b, c } => quadratic(a, b, c, x),
        }
    }
}

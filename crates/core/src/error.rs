//! Error taxonomy of the emission engine
//!
//! Three failure families exist and all of them abort the single computation
//! they belong to. There are no retries and no partial results: the engine
//! holds no state to roll back.
//!
//! - [`CopertError::Domain`] — an input (usually speed or ambient
//!   temperature) lies outside the validity window of the selected formula.
//! - [`CopertError::UnsupportedCombination`] — the guidebook defines no
//!   formula for the requested (pollutant, category, standard, ...) tuple.
//!   This is always surfaced, never silently defaulted to zero.
//! - [`CopertError::UnknownCategory`] — a category string in a parameter
//!   file does not map to a known value. Raised at load time, not at query
//!   time.

use thiserror::Error;

/// Errors produced by the emission engine and its parameter loaders.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CopertError {
    /// Input outside the validity window of the selected formula.
    #[error("{quantity} = {value} is outside the valid range [{min}, {max}] for {context}")]
    Domain {
        /// Which input violated its window (e.g. `"speed"`).
        quantity: &'static str,
        /// The offending value.
        value: f64,
        /// Lower bound of the validity window.
        min: f64,
        /// Upper bound of the validity window.
        max: f64,
        /// The category combination whose formula was selected.
        context: String,
    },

    /// No emission formula exists for the requested category tuple.
    #[error("no emission formula for {combination}")]
    UnsupportedCombination {
        /// Full description of the tuple (pollutant, category, standard,
        /// capacity where relevant), precise enough to diagnose.
        combination: String,
    },

    /// A category string in a parameter file does not map to a known value.
    #[error("unknown {kind} string {value:?} in parameter file")]
    UnknownCategory {
        /// Which kind of category failed to translate (e.g. `"fuel"`).
        kind: &'static str,
        /// The unrecognized string, verbatim.
        value: String,
    },

    /// A parameter file could not be read or parsed.
    #[error("failed to load parameter file {path:?}: {reason}")]
    Load {
        /// Path of the offending file.
        path: String,
        /// What went wrong, with a line number where one applies.
        reason: String,
    },
}

impl CopertError {
    /// Build a [`CopertError::Domain`] for a speed outside its window.
    pub(crate) fn speed_outside(value: f64, min: f64, max: f64, context: impl Into<String>) -> Self {
        CopertError::Domain {
            quantity: "speed",
            value,
            min,
            max,
            context: context.into(),
        }
    }

    /// Build a [`CopertError::Domain`] for an ambient temperature outside
    /// its window.
    pub(crate) fn temperature_outside(
        value: f64,
        min: f64,
        max: f64,
        context: impl Into<String>,
    ) -> Self {
        CopertError::Domain {
            quantity: "ambient temperature",
            value,
            min,
            max,
            context: context.into(),
        }
    }

    /// Build an [`CopertError::UnsupportedCombination`] from a formatted
    /// combination description.
    pub(crate) fn unsupported(combination: impl Into<String>) -> Self {
        CopertError::UnsupportedCombination {
            combination: combination.into(),
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CopertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_names_quantity_and_window() {
        let err = CopertError::speed_outside(5.0, 10.0, 130.0, "CO, gasoline passenger car");
        let msg = err.to_string();
        assert!(msg.contains("speed"));
        assert!(msg.contains("[10, 130]"));
        assert!(msg.contains("gasoline passenger car"));
    }

    #[test]
    fn unsupported_error_names_combination() {
        let err = CopertError::unsupported("PM, gasoline passenger car, PRE ECE");
        assert!(err.to_string().contains("PRE ECE"));
    }
}

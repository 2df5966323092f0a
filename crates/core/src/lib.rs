//! Road-transport emission factor library
//!
//! An implementation of the COPERT methodology (EMEP/EEA air pollutant
//! emission inventory guidebook) for hot exhaust emissions and cold-start
//! corrections of road vehicles: passenger cars, light commercial vehicles,
//! heavy-duty vehicles and buses, mopeds and motorcycles.
//!
//! ## Shape of the computation
//!
//! Every factor is a closed-form regression over the mean travel speed,
//! selected by a tuple of categories (pollutant, vehicle, engine, emission
//! standard, and per family the capacity band, weight segment, load state
//! or road slope). [`Copert`] resolves the tuple and evaluates the
//! regression; emissions over a link are factor × distance. Cold-start
//! excess is a separate pair of quantities ([`cold_start_quotient`],
//! [`cold_mileage_fraction`]) the caller composes with the hot result.
//!
//! Pre-Euro vehicles are served by inline regressions; Euro-class vehicles
//! by coefficient tables, either the embedded subset or external parameter
//! files loaded through [`Copert::from_files`].

pub mod categories;
pub mod cold;
pub mod engine;
pub mod equations;
pub mod error;
pub(crate) mod legacy;
pub mod parameters;

// Re-export the category vocabulary
pub use categories::{
    CapacityBand, CopertClass, EngineType, HdvClass, HdvLoad, HdvSegment, MotoClass,
    MotoSegment, Pollutant, RoadSlope, VehicleCategory,
};

// Re-export the computation surface
pub use cold::{cold_mileage_fraction, cold_start_quotient};
pub use engine::Copert;
pub use error::{CopertError, Result};
pub use parameters::ParameterStore;

//! The sampler driver (C7): iterates birth times, enumerates transverse
//! momentum candidates per batch, and packs the surviving candidates into
//! [SeedRow]s.

mod config;
mod driver;
mod row;

pub use self::config::{Dimension, PhaseMethod, SamplerConfig, SamplingMode};
pub use self::driver::Sampler;
pub use self::row::SeedRow;

//! ADK/MO-ADK initial-condition sampler for semiclassical strong-field
//! ionization.
//!
//! Given a laser pulse ([pulse]) and a tunneling-ionization target
//! ([target]), [sampler::Sampler] enumerates tunneling-exit candidates over
//! a birth-time grid and a transverse-momentum grid or Monte Carlo draw,
//! computes a complex ADK/MO-ADK amplitude for each ([amplitude]), and
//! emits the surviving candidates as packed [sampler::SeedRow]s for a
//! downstream classical trajectory propagator.
//!
//! Configuration loading, unit parsing, serialization, target-property
//! providers (beyond the plain data carried by [target::Target]), and
//! trajectory propagation itself are collaborators outside this crate's
//! scope.

pub mod amplitude;
pub mod angular;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod pulse;
pub mod sampler;
pub mod target;

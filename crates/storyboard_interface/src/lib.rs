//! Trait definitions for generation backends.
//!
//! The pipeline only talks to the hosted model through [`GenerationDriver`], so
//! tests can swap in a scripted driver and front ends can swap providers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::GenerationDriver;

//! Platform abstraction layer for reading the clock.
//!
//! This module allows switching between the real clock (using `std::time::Instant`)
//! and a mock clock for testing purposes.

mod abstractions;
mod facade;
mod real;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use real::*;

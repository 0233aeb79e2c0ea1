//! Shared utilities for the perceptron engine
//!
//! This module provides the shifted-sigmoid activation and its derivatives,
//! a finite-difference derivative oracle used to verify analytic gradients,
//! and a small seeded RNG for building reproducible random networks.

pub mod activations;
pub mod differential;
pub mod rng;

pub use rng::SimpleRng;

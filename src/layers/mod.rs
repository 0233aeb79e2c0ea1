//! Network building blocks
//!
//! This module provides the [`Neuron`] primitive and the [`Layer`] that
//! groups neurons evaluated on the same input vector.

pub mod layer;
pub mod neuron;

pub use layer::Layer;
pub use neuron::{activation, net_input, Neuron, NeuronParams};

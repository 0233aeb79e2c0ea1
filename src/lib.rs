//! Rust Perceptron Library
//!
//! A minimal feedforward network of shifted-sigmoid neurons with forward
//! inference and manual backpropagation of error gradients.
//!
//! # Modules
//!
//! - `layers`: Neuron primitive and the Layer grouping
//! - `perceptron`: The network: evaluation, error scoring, gradients
//! - `config`: Engine configuration (shift, gradient mode) and JSON loading
//! - `utils`: Activation functions, finite-difference oracle, RNG
//! - `error`: Error taxonomy shared by every module

pub mod config;
pub mod error;
pub mod layers;
pub mod perceptron;
pub mod utils;

pub use config::{EngineConfig, GradientMode};
pub use error::{PerceptronError, Result};
pub use layers::{Layer, Neuron, NeuronParams};
pub use perceptron::{ErrorReport, ForwardScratch, GradientReport, Gradients, Perceptron};

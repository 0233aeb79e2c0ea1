//! Shifted-sigmoid neuron
//!
//! A neuron owns its weight vector and bias (`theta`). The network-wide shift
//! (`phi`) is not stored here; it is passed in on every evaluation.

use crate::error::{PerceptronError, Result};
use crate::utils::activations::shifted_sigmoid;

/// Construction parameters for one neuron: its weights and bias.
///
/// A network is described as one `Vec<NeuronParams>` per layer.
///
/// # Example
///
/// ```
/// use rust_perceptron::layers::NeuronParams;
///
/// let params = NeuronParams::new(vec![0.1, 0.5, 2.0], 0.0);
/// assert_eq!(params.weights.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronParams {
    pub weights: Vec<f64>,
    pub theta: f64,
}

impl NeuronParams {
    pub fn new(weights: Vec<f64>, theta: f64) -> Self {
        Self { weights, theta }
    }
}

/// Pre-activation value: `-theta + Σ inputs[i] * weights[i]`.
///
/// Fails with [`PerceptronError::InvalidInputSize`] when there are more inputs
/// than weights. Fewer inputs are accepted; trailing weights are unused.
pub fn net_input(inputs: &[f64], weights: &[f64], theta: f64) -> Result<f64> {
    if inputs.len() > weights.len() {
        return Err(PerceptronError::InvalidInputSize {
            inputs: inputs.len(),
            weights: weights.len(),
        });
    }

    let sum = inputs
        .iter()
        .zip(weights.iter())
        .fold(-theta, |acc, (&input, &weight)| acc + input * weight);
    Ok(sum)
}

/// Neuron activation: `2 / (1 + exp(phi - net)) - 1` with `net` from
/// [`net_input`]. Pure function of its arguments.
pub fn activation(inputs: &[f64], weights: &[f64], theta: f64, phi: f64) -> Result<f64> {
    let net = net_input(inputs, weights, theta)?;
    Ok(shifted_sigmoid(net, phi))
}

/// A single neuron. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    theta: f64,
}

impl Neuron {
    /// Create a neuron, taking ownership of its weight vector.
    pub fn new(weights: Vec<f64>, theta: f64) -> Self {
        Self { weights, theta }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Number of trainable parameters: one per weight plus the bias.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + 1
    }

    /// Evaluate the neuron on `inputs` under the network shift `phi`.
    pub fn process(&self, inputs: &[f64], phi: f64) -> Result<f64> {
        activation(inputs, &self.weights, self.theta, phi)
    }
}

impl From<NeuronParams> for Neuron {
    fn from(params: NeuronParams) -> Self {
        Self::new(params.weights, params.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_net_input_subtracts_theta() {
        let net = net_input(&[1.0, 2.0], &[0.5, 0.25], 0.75).unwrap();
        assert!((net - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_net_input_uses_each_weight() {
        let inputs = [0.1, 0.2, 0.0, 1.0, 0.01];
        let weights = [1.0, 4.0, 1.0, 0.15, 67.0];
        let net = net_input(&inputs, &weights, 0.0).unwrap();
        assert!((net - 1.72).abs() < 1e-9);
    }

    #[test]
    fn test_net_input_fewer_inputs_than_weights() {
        let net = net_input(&[2.0], &[3.0, 100.0], 1.0).unwrap();
        assert!((net - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_net_input_empty_input_is_negative_theta() {
        let net = net_input(&[], &[3.0], 0.4).unwrap();
        assert!((net + 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_too_many_inputs_rejected() {
        let err = activation(&[1.0, 2.0, 3.0], &[1.0, 1.0], 0.0, 0.0).unwrap_err();
        match err {
            PerceptronError::InvalidInputSize { inputs, weights } => {
                assert_eq!(inputs, 3);
                assert_eq!(weights, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_neuron_process_matches_activation() {
        let neuron = Neuron::new(vec![0.3, -0.2], 0.1);
        let direct = activation(&[1.0, 0.5], &[0.3, -0.2], 0.1, 0.2).unwrap();
        assert_eq!(neuron.process(&[1.0, 0.5], 0.2).unwrap(), direct);
    }

    #[test]
    fn test_neuron_from_params() {
        let neuron = Neuron::from(NeuronParams::new(vec![1.0, 2.0, 3.0], 0.5));
        assert_eq!(neuron.weights(), &[1.0, 2.0, 3.0]);
        assert_eq!(neuron.theta(), 0.5);
        assert_eq!(neuron.parameter_count(), 4);
    }
}

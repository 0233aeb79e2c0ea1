//! A layer: an ordered group of neurons evaluated on the same input

use super::neuron::{Neuron, NeuronParams};
use crate::error::Result;

/// Ordered sequence of neurons. Width is the neuron count.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(neurons: Vec<Neuron>) -> Self {
        Self { neurons }
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Number of neurons, which is also the length of this layer's output.
    pub fn width(&self) -> usize {
        self.neurons.len()
    }

    /// Total weights and biases across the layer.
    pub fn parameter_count(&self) -> usize {
        self.neurons.iter().map(Neuron::parameter_count).sum()
    }

    /// Evaluate every neuron on `input`, writing into `output[..width]`.
    ///
    /// `output` must hold at least `width()` elements.
    pub fn forward_into(&self, input: &[f64], phi: f64, output: &mut [f64]) -> Result<()> {
        for (out, neuron) in output.iter_mut().zip(self.neurons.iter()) {
            *out = neuron.process(input, phi)?;
        }
        Ok(())
    }

    /// Evaluate every neuron on `input` into a new vector.
    pub fn forward(&self, input: &[f64], phi: f64) -> Result<Vec<f64>> {
        self.neurons
            .iter()
            .map(|neuron| neuron.process(input, phi))
            .collect()
    }
}

impl FromIterator<NeuronParams> for Layer {
    fn from_iter<I: IntoIterator<Item = NeuronParams>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Neuron::from).collect())
    }
}

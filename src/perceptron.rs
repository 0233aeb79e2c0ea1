//! Multi-layer perceptron: forward evaluation, error scoring and backpropagation
//!
//! A [`Perceptron`] is an ordered list of [`Layer`]s sharing one shift
//! parameter `phi`. Layer `i` consumes the output of layer `i - 1` (or the
//! network input for the first layer) positionally: output `j` of the previous
//! layer feeds weight `j` of every neuron in the next one.
//!
//! ```text
//! input ─▶ Layer[0] ─▶ Layer[1] ─▶ ... ─▶ Layer[N-1] ─▶ output
//!              ◀─────── deltas ◀──────────────┘
//! ```
//!
//! The network is immutable after construction. All scratch memory belongs to
//! the call (or to a caller-owned [`ForwardScratch`]), so one network can be
//! evaluated from several threads at once.

use crate::config::{EngineConfig, GradientMode};
use crate::error::{PerceptronError, Result};
use crate::layers::{Layer, NeuronParams};
use crate::utils::activations::{logistic_derivative, shifted_sigmoid_derivative};
use crate::utils::rng::SimpleRng;

/// Per-parameter error gradients.
///
/// `gradients[layer][neuron][0]` is the gradient of the bias term (the
/// additive `-theta`, so `∂E/∂theta = -gradients[layer][neuron][0]`);
/// `gradients[layer][neuron][1 + k]` is the gradient of weight `k`.
pub type Gradients = Vec<Vec<Vec<f64>>>;

/// Reusable double buffer for [`Perceptron::evaluate_with`].
///
/// Both halves grow to the widest vector seen (input or layer) and are then
/// reused, so repeated evaluations do not allocate. A scratch may be shared
/// between networks of different shapes but never between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ForwardScratch {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl ForwardScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size both buffers for vectors of up to `width` elements.
    pub fn with_capacity(width: usize) -> Self {
        Self {
            current: Vec::with_capacity(width),
            next: Vec::with_capacity(width),
        }
    }

    /// Allocated capacity of the smaller buffer.
    pub fn capacity(&self) -> usize {
        self.current.capacity().min(self.next.capacity())
    }
}

/// Result of [`Perceptron::total_error`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    /// Sum of `per_output`
    pub total: f64,
    /// `(actual - expected)²` for each output neuron, in output order
    pub per_output: Vec<f64>,
}

/// Result of [`Perceptron::total_error_and_gradients`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradientReport {
    /// Total error; its formula depends on the [`GradientMode`]
    pub total: f64,
    /// `(expected - actual)²` for each output neuron, in output order
    pub per_output: Vec<f64>,
    /// Gradients for every weight and bias, see [`Gradients`]
    pub gradients: Gradients,
    /// Output vector of every layer, last one included
    pub layer_outputs: Vec<Vec<f64>>,
}

/// Feedforward network of shifted-sigmoid neurons.
///
/// # Example
///
/// ```
/// use rust_perceptron::layers::NeuronParams;
/// use rust_perceptron::perceptron::Perceptron;
///
/// let network = Perceptron::new(
///     0.0,
///     vec![
///         vec![
///             NeuronParams::new(vec![0.5, -0.4], 0.1),
///             NeuronParams::new(vec![0.3, 0.8], 0.0),
///         ],
///         vec![NeuronParams::new(vec![1.0, -1.0], 0.0)],
///     ],
/// )
/// .unwrap();
///
/// let output = network.evaluate(&[1.0, 0.5]).unwrap();
/// assert_eq!(output.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Perceptron {
    layers: Vec<Layer>,
    phi: f64,
    max_layer_width: usize,
    gradient_mode: GradientMode,
}

impl Perceptron {
    /// Build a network from one `Vec<NeuronParams>` per layer and a shared shift.
    ///
    /// The neuron parameters are moved into the network. Uses
    /// [`GradientMode::Reference`]; see [`Perceptron::with_gradient_mode`].
    ///
    /// # Errors
    ///
    /// [`PerceptronError::EmptyNetwork`] when `layers` is empty.
    pub fn new(phi: f64, layers: Vec<Vec<NeuronParams>>) -> Result<Self> {
        if layers.is_empty() {
            return Err(PerceptronError::EmptyNetwork);
        }

        let layers: Vec<Layer> = layers
            .into_iter()
            .map(|params| params.into_iter().collect())
            .collect();
        let max_layer_width = layers.iter().map(Layer::width).max().unwrap_or(0);

        tracing::debug!(
            layers = layers.len(),
            max_layer_width,
            phi,
            "constructed perceptron"
        );

        Ok(Self {
            layers,
            phi,
            max_layer_width,
            gradient_mode: GradientMode::default(),
        })
    }

    /// Build a network using the shift and gradient mode from `config`.
    pub fn from_config(config: &EngineConfig, layers: Vec<Vec<NeuronParams>>) -> Result<Self> {
        Ok(Self::new(config.phi, layers)?.with_gradient_mode(config.gradient_mode))
    }

    /// Build a fully connected network with weights and biases uniform in [-1, 1).
    ///
    /// `widths` lists the neuron count of each layer; every neuron of layer `i`
    /// gets one weight per output of layer `i - 1` (or per input for layer 0).
    pub fn random(
        phi: f64,
        input_width: usize,
        widths: &[usize],
        rng: &mut SimpleRng,
    ) -> Result<Self> {
        let mut fan_in = input_width;
        let mut layers = Vec::with_capacity(widths.len());
        for &width in widths {
            let layer = (0..width)
                .map(|_| {
                    let weights = rng.gen_vec_f64(fan_in, -1.0, 1.0);
                    NeuronParams::new(weights, rng.gen_range_f64(-1.0, 1.0))
                })
                .collect();
            layers.push(layer);
            fan_in = width;
        }
        Self::new(phi, layers)
    }

    /// Select the delta rule used by [`Perceptron::total_error_and_gradients`].
    pub fn with_gradient_mode(mut self, mode: GradientMode) -> Self {
        self.gradient_mode = mode;
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn gradient_mode(&self) -> GradientMode {
        self.gradient_mode
    }

    /// Widest layer in the network; sizes the forward scratch buffers.
    pub fn max_layer_width(&self) -> usize {
        self.max_layer_width
    }

    /// Width of the last layer, i.e. the length of [`Perceptron::evaluate`]'s result.
    pub fn output_width(&self) -> usize {
        self.layers.last().map_or(0, Layer::width)
    }

    /// Total weights and biases across all layers.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Propagate `input` through every layer and return the last layer's output.
    ///
    /// # Errors
    ///
    /// [`PerceptronError::InvalidInputSize`] when a layer is fed more values than
    /// its neurons have weights.
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut scratch = ForwardScratch::with_capacity(self.max_layer_width.max(input.len()));
        let output = self.evaluate_with(input, &mut scratch)?;
        Ok(output.to_vec())
    }

    /// Same as [`Perceptron::evaluate`], reusing a caller-owned double buffer.
    ///
    /// The two halves of `scratch` are swapped after each layer; only the
    /// first `width` elements of a half are meaningful for a given layer.
    /// The returned slice borrows from `scratch`.
    pub fn evaluate_with<'s>(
        &self,
        input: &[f64],
        scratch: &'s mut ForwardScratch,
    ) -> Result<&'s [f64]> {
        let capacity = self.max_layer_width.max(input.len());

        scratch.current.clear();
        scratch.current.extend_from_slice(input);
        scratch.current.resize(capacity, 0.0);
        scratch.next.resize(capacity, 0.0);

        let mut fed = input.len();
        for (index, layer) in self.layers.iter().enumerate() {
            let width = layer.width();
            layer.forward_into(&scratch.current[..fed], self.phi, &mut scratch.next[..width])?;
            std::mem::swap(&mut scratch.current, &mut scratch.next);
            tracing::trace!(layer = index, inputs = fed, width, "forward");
            fed = width;
        }

        Ok(&scratch.current[..fed])
    }

    /// Propagate `input` and keep every layer's output, last one included.
    pub fn evaluate_all_layers(&self, input: &[f64]) -> Result<Vec<Vec<f64>>> {
        let mut outputs: Vec<Vec<f64>> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let feed = outputs.last().map_or(input, Vec::as_slice);
            let output = layer.forward(feed, self.phi)?;
            outputs.push(output);
        }
        Ok(outputs)
    }

    /// Squared error of the network output against `expected`.
    ///
    /// # Errors
    ///
    /// [`PerceptronError::OutputSizeMismatch`] when `expected` does not have one
    /// value per output neuron, plus any error from [`Perceptron::evaluate`].
    pub fn total_error(&self, input: &[f64], expected: &[f64]) -> Result<ErrorReport> {
        self.check_expected(expected)?;

        let output = self.evaluate(input)?;
        let per_output: Vec<f64> = output
            .iter()
            .zip(expected)
            .map(|(&actual, &target)| {
                let diff = actual - target;
                diff * diff
            })
            .collect();
        let total = per_output.iter().sum();

        Ok(ErrorReport { total, per_output })
    }

    /// Error, per-output error, gradients and layer outputs in one pass.
    ///
    /// Deltas are computed for the output layer from the raw errors
    /// `e = expected - actual`, then propagated back one layer at a time
    /// through the next layer's weights. Each neuron's gradient vector is
    /// `-2 * delta` for the bias term followed by `-2 * delta * feed[k]` for
    /// each weight, where `feed` is the vector the layer consumed. Weight
    /// slots beyond the feed width are left at zero.
    ///
    /// In [`GradientMode::Reference`] the returned `total` is `Σ per_output²`;
    /// in [`GradientMode::Corrected`] it is `Σ per_output`.
    pub fn total_error_and_gradients(
        &self,
        input: &[f64],
        expected: &[f64],
    ) -> Result<GradientReport> {
        self.check_expected(expected)?;

        let layer_outputs = self.evaluate_all_layers(input)?;
        let last = self.layers.len() - 1;

        let (output_gain, derivative): (f64, fn(f64) -> f64) = match self.gradient_mode {
            GradientMode::Reference => (2.0, logistic_derivative),
            GradientMode::Corrected => (1.0, shifted_sigmoid_derivative),
        };

        let actual = &layer_outputs[last];
        let errors: Vec<f64> = expected
            .iter()
            .zip(actual)
            .map(|(&target, &output)| target - output)
            .collect();

        let mut deltas: Vec<f64> = Vec::with_capacity(self.max_layer_width);
        let mut succ_deltas: Vec<f64> = Vec::with_capacity(self.max_layer_width);
        deltas.extend(
            errors
                .iter()
                .zip(actual)
                .map(|(&error, &output)| error * output_gain * derivative(output)),
        );

        let mut gradients: Gradients = vec![Vec::new(); self.layers.len()];
        gradients[last] =
            layer_gradients(&self.layers[last], &deltas, feed_for(input, &layer_outputs, last));

        for index in (0..last).rev() {
            std::mem::swap(&mut deltas, &mut succ_deltas);
            deltas.clear();

            let next_layer = &self.layers[index + 1];
            // every neuron of the next layer has a weight for each output here,
            // otherwise the forward pass would have failed
            deltas.extend(layer_outputs[index].iter().enumerate().map(|(j, &output)| {
                let downstream: f64 = next_layer
                    .neurons()
                    .iter()
                    .zip(&succ_deltas)
                    .map(|(neuron, &delta)| delta * neuron.weights()[j])
                    .sum();
                downstream * derivative(output)
            }));

            gradients[index] = layer_gradients(
                &self.layers[index],
                &deltas,
                feed_for(input, &layer_outputs, index),
            );
            tracing::trace!(layer = index, width = deltas.len(), "backpropagated deltas");
        }

        let per_output: Vec<f64> = errors.iter().map(|error| error * error).collect();
        // reference total squares the squared errors again: Σ e⁴, not Σ e²
        let total = match self.gradient_mode {
            GradientMode::Reference => per_output.iter().map(|squared| squared * squared).sum(),
            GradientMode::Corrected => per_output.iter().sum(),
        };

        Ok(GradientReport {
            total,
            per_output,
            gradients,
            layer_outputs,
        })
    }

    fn check_expected(&self, expected: &[f64]) -> Result<()> {
        let outputs = self.output_width();
        if expected.len() != outputs {
            return Err(PerceptronError::OutputSizeMismatch {
                expected: outputs,
                actual: expected.len(),
            });
        }
        Ok(())
    }
}

/// Vector consumed by layer `index`: the network input or the previous output.
fn feed_for<'a>(input: &'a [f64], layer_outputs: &'a [Vec<f64>], index: usize) -> &'a [f64] {
    if index == 0 {
        input
    } else {
        &layer_outputs[index - 1]
    }
}

fn layer_gradients(layer: &Layer, deltas: &[f64], feed: &[f64]) -> Vec<Vec<f64>> {
    layer
        .neurons()
        .iter()
        .zip(deltas)
        .map(|(neuron, &delta)| {
            let mut gradient = vec![0.0; neuron.weights().len() + 1];
            gradient[0] = -2.0 * delta;
            for (slot, &value) in gradient[1..].iter_mut().zip(feed) {
                *slot = -2.0 * delta * value;
            }
            gradient
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_layer_network() -> Perceptron {
        Perceptron::new(
            0.1,
            vec![
                vec![
                    NeuronParams::new(vec![0.5, -0.4, 0.2], 0.1),
                    NeuronParams::new(vec![0.3, 0.8, -0.6], -0.2),
                    NeuronParams::new(vec![-0.7, 0.1, 0.9], 0.0),
                ],
                vec![NeuronParams::new(vec![1.0, -1.0, 0.5], 0.05)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_network_rejected() {
        assert!(matches!(
            Perceptron::new(0.0, Vec::new()),
            Err(PerceptronError::EmptyNetwork)
        ));
    }

    #[test]
    fn test_construction_caches_widths() {
        let network = two_layer_network();
        assert_eq!(network.layer_count(), 2);
        assert_eq!(network.max_layer_width(), 3);
        assert_eq!(network.output_width(), 1);
        assert_eq!(network.parameter_count(), 3 * 4 + 4);
        assert_eq!(network.gradient_mode(), GradientMode::Reference);
    }

    #[test]
    fn test_evaluate_matches_layer_by_layer() {
        let network = two_layer_network();
        let input = [0.2, -0.3, 0.9];

        let hidden = network.layers()[0].forward(&input, 0.1).unwrap();
        let expected = network.layers()[1].forward(&hidden, 0.1).unwrap();

        assert_eq!(network.evaluate(&input).unwrap(), expected);
    }

    #[test]
    fn test_scratch_tracks_layer_length_not_capacity() {
        let network = two_layer_network();
        let mut scratch = ForwardScratch::new();

        let output = network.evaluate_with(&[0.2, -0.3, 0.9], &mut scratch).unwrap();
        assert_eq!(output.len(), 1);
        assert!(scratch.capacity() >= 3);
    }

    #[test]
    fn test_feed_for_selects_previous_output() {
        let outputs = vec![vec![1.0], vec![2.0, 3.0]];
        assert_eq!(feed_for(&[9.0], &outputs, 0), &[9.0]);
        assert_eq!(feed_for(&[9.0], &outputs, 1), &[1.0]);
        assert_eq!(feed_for(&[9.0], &outputs, 2), &[2.0, 3.0]);
    }

    #[test]
    fn test_layer_gradients_pads_unused_weights() {
        let layer: Layer = vec![NeuronParams::new(vec![1.0, 1.0, 1.0], 0.0)]
            .into_iter()
            .collect();
        let gradients = layer_gradients(&layer, &[0.5], &[2.0]);
        assert_eq!(gradients, vec![vec![-1.0, -2.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_perceptron_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Perceptron>();
    }
}

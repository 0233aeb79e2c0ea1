//! Activation functions for the perceptron
//!
//! The network uses a shifted, rescaled logistic sigmoid with range (-1, 1):
//!
//! ```text
//! f(net) = 2 / (1 + exp(phi - net)) - 1
//! ```
//!
//! Two derivative forms are provided, both expressed in terms of the
//! activation output `y = f(net)`:
//!
//! - [`logistic_derivative`]: `y * (1 - y)`, the derivative of a (0, 1)
//!   sigmoid. This is what the reference gradient mode applies.
//! - [`shifted_sigmoid_derivative`]: `(1 + y) * (1 - y) / 2`, the exact
//!   derivative of `f`. Used by the corrected gradient mode.

/// Shifted sigmoid activation.
///
/// Returns `2 / (1 + exp(phi - net)) - 1`. No clamping is applied to the
/// exponent; extreme `phi - net` saturates to -1 or 1.
pub fn shifted_sigmoid(net: f64, phi: f64) -> f64 {
    2.0 / (1.0 + (phi - net).exp()) - 1.0
}

/// Logistic derivative assuming y = sigmoid(z).
///
/// Returns the derivative: y * (1 - y)
pub fn logistic_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}

/// Exact derivative of [`shifted_sigmoid`] with respect to `net`, given
/// its output `y`.
pub fn shifted_sigmoid_derivative(y: f64) -> f64 {
    (1.0 + y) * (1.0 - y) / 2.0
}

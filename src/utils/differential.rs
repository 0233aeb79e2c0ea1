//! Forward-difference derivative oracle
//!
//! Numerically approximates `f'(x)` so analytic gradients can be checked.
//! The engine itself never calls this.

/// Step used by [`derivative_default`].
pub const DEFAULT_STEP: f64 = 0.0001;

/// Forward difference quotient `(f(x + step) - f(x)) / step`.
pub fn derivative<F>(mut func: F, x: f64, step: f64) -> f64
where
    F: FnMut(f64) -> f64,
{
    (func(x + step) - func(x)) / step
}

/// [`derivative`] with [`DEFAULT_STEP`].
pub fn derivative_default<F>(func: F, x: f64) -> f64
where
    F: FnMut(f64) -> f64,
{
    derivative(func, x, DEFAULT_STEP)
}

mod vector;

pub use vector::Vector2;

/// Scalar type used throughout the engine
pub type Real = f64;

/// Constant for a very small number, used for comparisons
pub const EPSILON: Real = 1.0e-9;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: Real) -> bool {
    a.abs() < EPSILON
}

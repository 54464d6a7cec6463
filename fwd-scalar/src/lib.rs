//!
//! # fwd-scalar
//!
//! This crate provides the elementary functions for dual values. Each one is the
//! chain rule applied once: `f(x)` becomes `(f(x.value), f'(x.value) · x.gradient)`
//! with the derivative evaluated at the input's value.
//!
//! Domain errors (a negative argument to `sqrt`, `ln` of zero, ...) are not
//! special-cased and come out as NaN/inf just like on the plain scalar.
//!

use nalgebra::ComplexField;

use lib_fwd_core::{Dual, Real};

/// Extension trait providing elementary functions on `Dual<T, N>`
pub trait DualExt: Sized {
  /// Scalar the dual is built over, used for real-valued exponents
  type Scalar;

  /// Sine
  fn sin(self) -> Self;
  /// Cosine
  fn cos(self) -> Self;
  /// Tangent
  fn tan(self) -> Self;
  /// Arctangent
  fn atan(self) -> Self;
  /// Square root
  fn sqrt(self) -> Self;
  /// Exponential
  fn exp(self) -> Self;
  /// Natural logarithm
  fn ln(self) -> Self;
  /// Reciprocal (1/x)
  fn recip(self) -> Self;
  /// Integer power
  fn powi(self, n: i32) -> Self;
  /// Real power with a constant exponent
  fn powf(self, n: Self::Scalar) -> Self;
  /// Absolute value, with zero derivative at ±0
  fn abs(self) -> Self;
}

impl<T: Real, const N: usize> DualExt for Dual<T, N> {
  type Scalar = T;

  #[inline]
  fn sin(self) -> Self {
    let v = self.value;
    self.chain(v.sin(), v.cos())
  }

  #[inline]
  fn cos(self) -> Self {
    let v = self.value;
    self.chain(v.cos(), -v.sin())
  }

  #[inline]
  fn tan(self) -> Self {
    let v = self.value;
    let c = v.cos();
    self.chain(v.tan(), T::one() / (c * c))
  }

  #[inline]
  fn atan(self) -> Self {
    let v = self.value;
    self.chain(v.atan(), T::one() / (T::one() + v * v))
  }

  #[inline]
  fn sqrt(self) -> Self {
    let s = self.value.sqrt();
    let two = T::one() + T::one();
    self.chain(s, T::one() / two / s)
  }

  #[inline]
  fn exp(self) -> Self {
    let e = self.value.exp();
    self.chain(e, e)
  }

  #[inline]
  fn ln(self) -> Self {
    let v = self.value;
    self.chain(v.ln(), T::one() / v)
  }

  #[inline]
  fn recip(self) -> Self {
    let r = T::one() / self.value;
    self.chain(r, -r * r)
  }

  #[inline]
  fn powi(self, n: i32) -> Self {
    let v = self.value;
    if n == 0 {
      // x⁰ is constant even at x = 0, where n·x⁻¹ would be NaN
      return self.chain(T::one(), T::zero());
    }
    let n_t: T = nalgebra::convert(n as f64);
    self.chain(v.powi(n), n_t * v.powi(n - 1))
  }

  #[inline]
  fn powf(self, n: T) -> Self {
    let v = self.value;
    if n.is_zero() {
      return self.chain(v.powf(n), T::zero());
    }
    self.chain(v.powf(n), n * v.powf(n - T::one()))
  }

  #[inline]
  fn abs(self) -> Self {
    let v = self.value;
    let slope = if v.is_zero() { T::zero() } else { ComplexField::signum(v) };
    self.chain(ComplexField::abs(v), slope)
  }
}

//!
//! # fwd
//!
//! ## Core API
//!
//! Forward-mode automatic differentiation over nalgebra. Every [`Dual`] carries
//! its exact gradient with respect to a fixed number of seeded variables, so a
//! single evaluation of a function yields both its value and its derivatives.
//!
//! Seed inputs with [`Dual::seed`] or [`variables`], compute with the usual
//! operators (elementary functions live in [`scalar::DualExt`]), and read the
//! result's `gradient`, or stack several results into a Jacobian with
//! [`matrix::jacobian`].
//!
//! ```
//! use fwd::scalar::DualExt;
//! use fwd::matrix::jacobian;
//! use fwd::variables;
//! use nalgebra::Vector2;
//!
//! let [x, y] = variables([1.0_f64, 2.0]);
//! let r = (x * x + y * y).sqrt();
//! let angle = (y / x).atan();
//!
//! let j = jacobian(&Vector2::new(r, angle));
//! assert!((j[(1, 0)] + 0.4).abs() < 1e-12);
//! ```
//!

pub use lib_fwd_core::*;

#[cfg(feature = "scalar")]
pub use lib_fwd_scalar as scalar;

#[cfg(feature = "matrix")]
pub use lib_fwd_matrix as matrix;

#[cfg(all(test, feature = "scalar", feature = "matrix"))]
mod tests {
  use super::matrix::{jacobian, jacobian_of, lift};
  use super::scalar::DualExt;
  use super::*;
  use approx::assert_relative_eq;
  use nalgebra::{Matrix2, Vector2};

  /// `a · (A b)` with every entry built from the two variables
  fn bilinear<S>(x: S, y: S, sin: fn(S) -> S, cos: fn(S) -> S) -> S
  where
    S: Copy + std::ops::Add<Output = S> + std::ops::Sub<Output = S> + std::ops::Mul<Output = S>,
  {
    let a = [sin(x), cos(y)];
    let b = [cos(x), sin(y)];
    let m = [[x, x + y], [x - y, y]];
    let ab = [
      m[0][0] * b[0] + m[0][1] * b[1],
      m[1][0] * b[0] + m[1][1] * b[1],
    ];
    a[0] * ab[0] + a[1] * ab[1]
  }

  mod end_to_end {
    use super::*;

    #[test]
    fn bilinear_form_through_nalgebra() {
      let [x, y] = variables([1.0f64, 2.0]);
      let m = Matrix2::new(x, x + y, x - y, y);
      let a = Vector2::new(x.sin(), y.cos());
      let b = Vector2::new(x.cos(), y.sin());
      let val = a.dot(&(m * b));

      let plain = |x: f64, y: f64| bilinear(x, y, f64::sin, f64::cos);
      let h = 1e-6;
      let dx = (plain(1.0 + h, 2.0) - plain(1.0 - h, 2.0)) / (2.0 * h);
      let dy = (plain(1.0, 2.0 + h) - plain(1.0, 2.0 - h)) / (2.0 * h);

      assert_relative_eq!(val.value, plain(1.0, 2.0), epsilon = 1e-12);
      assert_relative_eq!(val.gradient[0], dx, epsilon = 1e-6);
      assert_relative_eq!(val.gradient[1], dy, epsilon = 1e-6);

      // hand-expanded version agrees with the matrix route
      let by_hand = bilinear(x, y, DualExt::sin, DualExt::cos);
      assert_relative_eq!(by_hand.gradient, val.gradient, epsilon = 1e-12);
    }

    #[test]
    fn single_precision_driver() {
      let x = Dual::<f32, 2>::seed(0, 1.0);
      let y = Dual::<f32, 2>::seed(1, 2.0);

      let m = Matrix2::new(x, x + y, x - y, y);
      let a = Vector2::new(x.sin(), y.cos());
      let b = Vector2::new(x.cos(), y.sin());
      let val = a.dot(&(m * b));
      let by_hand = bilinear(x, y, DualExt::sin, DualExt::cos);
      assert_relative_eq!(val.value, by_hand.value, epsilon = 1e-5);
      assert_relative_eq!(val.gradient[0], by_hand.gradient[0], epsilon = 1e-5);
      assert_relative_eq!(val.gradient[1], by_hand.gradient[1], epsilon = 1e-5);

      let r = (x * x + y * y).sqrt();
      let angle = (y / x).atan();
      let j = jacobian(&Vector2::new(r, angle));
      assert_relative_eq!(j, Matrix2::new(0.4472f32, 0.8944, -0.4, 0.2), epsilon = 1e-4);
    }

    #[test]
    fn jacobian_of_linear_map_is_the_map() {
      let m = Matrix2::new(2.0, -1.0, 0.5, 3.0);
      let (value, j) = jacobian_of(|[x, y]| lift(&m) * Vector2::new(x, y), [4.0, 1.0]);
      assert_relative_eq!(value, m * Vector2::new(4.0, 1.0), epsilon = 1e-12);
      assert_eq!(j, m);
    }

    #[test]
    fn gradient_of_quadratic_form() {
      // f(v) = vᵀ Q v, ∇f = (Q + Qᵀ) v
      let q = Matrix2::new(1.0, 2.0, 0.0, 3.0);
      let v = Vector2::new(-1.0, 0.5);
      let (value, grad) = gradient(
        |[x, y]| {
          let v = Vector2::new(x, y);
          v.dot(&(lift(&q) * v))
        },
        [v[0], v[1]],
      );
      assert_relative_eq!(value, v.dot(&(q * v)), epsilon = 1e-12);
      assert_relative_eq!(grad, (q + q.transpose()) * v, epsilon = 1e-12);
    }
  }
}

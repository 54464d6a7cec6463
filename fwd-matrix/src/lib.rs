//!
//! # fwd-matrix
//!
//! This crate provides the matrix side of the library on top of nalgebra: the
//! scalar descriptor for dual values, lifting constant matrices into duals, and
//! stacking the gradients of a vector of outputs into a Jacobian.
//!
//! Matrix and vector products over duals need nothing from here, they come from
//! nalgebra directly once `fwd-core` has registered the type.
//!

use nalgebra::{DMatrix, SMatrix, SVector, Scalar};

use lib_fwd_core::{variables, Dual, Real};

/// Static description of a scalar type as seen by linear algebra code.
///
/// Purely descriptive: what nalgebra actually needs to treat a dual as a scalar
/// (`Zero`, `One`, `SubsetOf` and the closed arithmetic operators) is implemented
/// on [`Dual`] in `fwd-core`. Generic code can bound on this trait to query the
/// classification flags and cost hints.
///
/// Cost hints are relative: reads are cheapest, the exact numbers carry no
/// meaning beyond that ordering.
pub trait ScalarTraits: Scalar {
  /// Type of magnitudes of `Self`
  type Real: Scalar;
  /// Type produced by division
  type NonInteger: Scalar;

  const IS_COMPLEX: bool;
  const IS_INTEGER: bool;
  const IS_SIGNED: bool;
  /// False when a zeroed bit pattern is a valid value
  const REQUIRE_INITIALIZATION: bool;

  const READ_COST: u32;
  const ADD_COST: u32;
  const MUL_COST: u32;
}

macro_rules! float_scalar_traits {
  ($($t:ty),*) => {
    $(
      impl ScalarTraits for $t {
        type Real = $t;
        type NonInteger = $t;

        const IS_COMPLEX: bool = false;
        const IS_INTEGER: bool = false;
        const IS_SIGNED: bool = true;
        const REQUIRE_INITIALIZATION: bool = false;

        const READ_COST: u32 = 1;
        const ADD_COST: u32 = 1;
        const MUL_COST: u32 = 1;
      }
    )*
  };
}

float_scalar_traits!(f32, f64);

/// A dual is its own magnitude type, the sensitivity information has to survive
/// `abs`/`norm`. It needs real initialization since the gradient is part of the
/// value.
impl<T, const N: usize> ScalarTraits for Dual<T, N>
where
  T: Real + ScalarTraits,
{
  type Real = Self;
  type NonInteger = Self;

  const IS_COMPLEX: bool = false;
  const IS_INTEGER: bool = false;
  const IS_SIGNED: bool = true;
  const REQUIRE_INITIALIZATION: bool = true;

  const READ_COST: u32 = T::READ_COST;
  const ADD_COST: u32 = 3 * T::ADD_COST;
  const MUL_COST: u32 = 3 * T::MUL_COST;
}

/// Promote a constant matrix into duals with zero gradients, elementwise.
///
/// Same as `m.cast::<Dual<T, N>>()` for `f32`/`f64`, without needing the
/// subset relation to be spelled out in generic code.
#[inline]
pub fn lift<T: Real, const R: usize, const C: usize, const N: usize>(
  m: &SMatrix<T, R, C>,
) -> SMatrix<Dual<T, N>, R, C> {
  m.map(Dual::constant)
}

/// Dynamically sized [`lift`]
#[inline]
pub fn lift_dyn<T: Real, const N: usize>(m: &DMatrix<T>) -> DMatrix<Dual<T, N>> {
  m.map(Dual::constant)
}

/// Stack the gradients of `M` outputs into an `M x N` Jacobian; row `i` is
/// `outputs[i].gradient`.
///
/// ```
/// use lib_fwd_core::variables;
/// use lib_fwd_matrix::jacobian;
/// use nalgebra::{Matrix2, Vector2};
///
/// let [x, y] = variables([3.0, 4.0]);
/// let j = jacobian(&Vector2::new(x * y, x - y));
///
/// assert_eq!(j, Matrix2::new(4.0, 3.0, 1.0, -1.0));
/// ```
pub fn jacobian<T: Real, const M: usize, const N: usize>(
  outputs: &SVector<Dual<T, N>, M>,
) -> SMatrix<T, M, N> {
  let mut jacobian = SMatrix::<T, M, N>::zeros();
  for (i, output) in outputs.iter().enumerate() {
    jacobian.set_row(i, &output.gradient.transpose());
  }
  jacobian
}

/// [`jacobian`] for a number of outputs only known at runtime
pub fn jacobian_dyn<T: Real, const N: usize>(outputs: &[Dual<T, N>]) -> DMatrix<T> {
  DMatrix::from_fn(outputs.len(), N, |i, j| outputs[i].gradient[j])
}

/// Evaluate a vector valued function of `N` variables once, returning its value
/// and Jacobian at `point`.
pub fn jacobian_of<T, F, const M: usize, const N: usize>(
  f: F,
  point: [T; N],
) -> (SVector<T, M>, SMatrix<T, M, N>)
where
  T: Real,
  F: FnOnce([Dual<T, N>; N]) -> SVector<Dual<T, N>, M>,
{
  let outputs = f(variables(point));
  (outputs.map(|output| output.value), jacobian(&outputs))
}

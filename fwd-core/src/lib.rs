//!
//! # fwd-core
//!
//! ## Dual values
//!
//! A [`Dual`] pairs the result of a computation with the exact partial
//! derivatives of that result with respect to `N` independent variables. Values
//! are seeded with [`Dual::seed`], combined through the ordinary arithmetic
//! operators, and every result carries its gradient along with it...
//!
//! Nothing is recorded about how a value was produced, there is no tape. Each
//! operator applies the sum, product or quotient rule once and hands back a new
//! value.
//!
//! ## Invariants
//!
//! 1. `N` is a const generic, so duals tracking a different number of variables
//!    cannot be combined; the mismatch is a type error
//! 2. A constant lift has an all-zero gradient
//! 3. Division by zero and domain errors are not trapped, they surface as
//!    inf/NaN exactly as they would on the underlying scalar
//!
//! The type registers with nalgebra as a scalar (`Zero`, `One`, the closed
//! arithmetic traits and `SubsetOf` for casts), so matrices and vectors of duals
//! support products, dot products and `cast` out of the box.
//!

use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::{RealField, SVector};

use num_traits::{One, Zero};

use simba::scalar::SubsetOf;

/// Scalar types a [`Dual`] can be built over.
///
/// Anything nalgebra treats as a real field and that is `Copy`; in practice
/// `f32` and `f64`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// A value together with its gradient over `N` independent variables.
///
/// `gradient[i]` is the partial derivative of `value` with respect to variable
/// `i`, in the order the variables were seeded.
///
/// ```
/// use lib_fwd_core::Dual;
///
/// let x = Dual::<f64, 2>::seed(0, 3.0);
/// let y = Dual::<f64, 2>::seed(1, 4.0);
/// let f = x * y + 2.0;
///
/// assert_eq!(f.value, 14.0);
/// assert_eq!(f.gradient[0], 4.0);
/// assert_eq!(f.gradient[1], 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<T, const N: usize> {
  /// Result of the computation at this point
  pub value: T,
  /// Partial derivatives of `value`, one per independent variable
  pub gradient: SVector<T, N>,
}

impl<T: Real, const N: usize> Dual<T, N> {
  /// Build a dual from a value and an explicit gradient
  #[inline]
  pub fn new(value: T, gradient: SVector<T, N>) -> Self {
    Self { value, gradient }
  }

  /// Lift a plain scalar; constants have zero derivative everywhere
  #[inline]
  pub fn constant(value: T) -> Self {
    Self {
      value,
      gradient: SVector::zeros(),
    }
  }

  /// Seed independent variable `index` at `value`.
  ///
  /// The gradient is the `index`-th unit vector.
  ///
  /// # Panics
  ///
  /// Panics if `index >= N`.
  #[inline]
  pub fn seed(index: usize, value: T) -> Self {
    assert!(
      index < N,
      "variable index {} out of bounds for {} variables",
      index,
      N
    );
    let mut gradient = SVector::<T, N>::zeros();
    gradient[index] = T::one();
    Self { value, gradient }
  }

  /// Core primitive for unary functions: given `f(x)` and `f'(x)` evaluated at
  /// `self.value`, produce the dual of `f(self)` by the chain rule.
  #[inline]
  pub fn chain(&self, value: T, derivative: T) -> Self {
    Self {
      value,
      gradient: self.gradient * derivative,
    }
  }

  /// Number of independent variables tracked
  #[inline(always)]
  pub const fn dim(&self) -> usize {
    N
  }

  /// True when every partial derivative is zero
  #[inline]
  pub fn is_constant(&self) -> bool {
    self.gradient.iter().all(|d| d.is_zero())
  }
}

impl<T: Real, const N: usize> Default for Dual<T, N> {
  fn default() -> Self {
    Self::constant(T::zero())
  }
}

impl<T: Real, const N: usize> From<T> for Dual<T, N> {
  #[inline]
  fn from(value: T) -> Self {
    Self::constant(value)
  }
}

/// Seed every coordinate of `point`, variable `i` taking `point[i]`
pub fn variables<T: Real, const N: usize>(point: [T; N]) -> [Dual<T, N>; N] {
  std::array::from_fn(|i| Dual::seed(i, point[i]))
}

/// Evaluate a scalar function of `N` variables once, returning its value and
/// gradient at `point`.
///
/// ```
/// use lib_fwd_core::{gradient, Dual};
///
/// // f(x, y) = x² + xy
/// let f = |[x, y]: [Dual<f64, 2>; 2]| x * x + x * y;
/// let (value, grad) = gradient(f, [3.0, 4.0]);
///
/// assert_eq!(value, 21.0);
/// assert_eq!(grad[0], 10.0);
/// assert_eq!(grad[1], 3.0);
/// ```
pub fn gradient<T, F, const N: usize>(f: F, point: [T; N]) -> (T, SVector<T, N>)
where
  T: Real,
  F: FnOnce([Dual<T, N>; N]) -> Dual<T, N>,
{
  let result = f(variables(point));
  (result.value, result.gradient)
}

// dual (op) dual

impl<T: Real, const N: usize> Add for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn add(self, rhs: Self) -> Self {
    Self::new(self.value + rhs.value, self.gradient + rhs.gradient)
  }
}

impl<T: Real, const N: usize> Sub for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.value - rhs.value, self.gradient - rhs.gradient)
  }
}

impl<T: Real, const N: usize> Mul for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: Self) -> Self {
    // (fg)' = f g' + g f'
    Self::new(
      self.value * rhs.value,
      rhs.gradient * self.value + self.gradient * rhs.value,
    )
  }
}

impl<T: Real, const N: usize> Div for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn div(self, rhs: Self) -> Self {
    // (f/g)' = (g f' - f g') / g²
    Self::new(
      self.value / rhs.value,
      (self.gradient * rhs.value - rhs.gradient * self.value) / (rhs.value * rhs.value),
    )
  }
}

impl<T: Real, const N: usize> Neg for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self {
    Self::new(-self.value, -self.gradient)
  }
}

// dual (op) scalar

impl<T: Real, const N: usize> Add<T> for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn add(self, rhs: T) -> Self {
    Self::new(rhs + self.value, self.gradient)
  }
}

impl<T: Real, const N: usize> Sub<T> for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn sub(self, rhs: T) -> Self {
    Self::new(self.value - rhs, self.gradient)
  }
}

impl<T: Real, const N: usize> Mul<T> for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: T) -> Self {
    Self::new(rhs * self.value, self.gradient * rhs)
  }
}

impl<T: Real, const N: usize> Div<T> for Dual<T, N> {
  type Output = Self;

  #[inline]
  fn div(self, rhs: T) -> Self {
    Self::new(self.value / rhs, self.gradient / rhs)
  }
}

// scalar (op) dual, coherence only allows these for concrete scalar types...
macro_rules! scalar_lhs_ops {
  ($($t:ty),*) => {
    $(
      impl<const N: usize> Add<Dual<$t, N>> for $t {
        type Output = Dual<$t, N>;

        #[inline]
        fn add(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
          Dual::new(self + rhs.value, rhs.gradient)
        }
      }

      impl<const N: usize> Sub<Dual<$t, N>> for $t {
        type Output = Dual<$t, N>;

        #[inline]
        fn sub(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
          Dual::new(self - rhs.value, -rhs.gradient)
        }
      }

      impl<const N: usize> Mul<Dual<$t, N>> for $t {
        type Output = Dual<$t, N>;

        #[inline]
        fn mul(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
          Dual::new(self * rhs.value, rhs.gradient * self)
        }
      }

      impl<const N: usize> Div<Dual<$t, N>> for $t {
        type Output = Dual<$t, N>;

        #[inline]
        fn div(self, rhs: Dual<$t, N>) -> Dual<$t, N> {
          // (c/g)' = -c g' / g²
          Dual::new(self / rhs.value, rhs.gradient * (-self / rhs.value / rhs.value))
        }
      }
    )*
  };
}

scalar_lhs_ops!(f32, f64);

// compound assignment is recompute-and-rebind, never a separate code path
macro_rules! compound_assign {
  ($trait:ident, $method:ident, $op:tt) => {
    impl<T: Real, const N: usize> $trait for Dual<T, N> {
      #[inline]
      fn $method(&mut self, rhs: Self) {
        *self = *self $op rhs;
      }
    }

    impl<T: Real, const N: usize> $trait<T> for Dual<T, N> {
      #[inline]
      fn $method(&mut self, rhs: T) {
        *self = *self $op rhs;
      }
    }
  };
}

compound_assign!(AddAssign, add_assign, +);
compound_assign!(SubAssign, sub_assign, -);
compound_assign!(MulAssign, mul_assign, *);
compound_assign!(DivAssign, div_assign, /);

impl<T: Real, const N: usize> Sum for Dual<T, N> {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::zero(), |acc, x| acc + x)
  }
}

impl<'a, T: Real, const N: usize> Sum<&'a Dual<T, N>> for Dual<T, N> {
  fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
    iter.fold(Self::zero(), |acc, x| acc + *x)
  }
}

impl<T: Real, const N: usize> Product for Dual<T, N> {
  fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::one(), |acc, x| acc * x)
  }
}

impl<'a, T: Real, const N: usize> Product<&'a Dual<T, N>> for Dual<T, N> {
  fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
    iter.fold(Self::one(), |acc, x| acc * *x)
  }
}

// nalgebra scalar registration: additive and multiplicative identities...

impl<T: Real, const N: usize> Zero for Dual<T, N> {
  #[inline]
  fn zero() -> Self {
    Self::constant(T::zero())
  }

  #[inline]
  fn is_zero(&self) -> bool {
    self.value.is_zero() && self.is_constant()
  }
}

impl<T: Real, const N: usize> One for Dual<T, N> {
  #[inline]
  fn one() -> Self {
    Self::constant(T::one())
  }
}

// ...and the subset relation `Matrix::cast` goes through. A dual narrows back
// to a plain scalar only when it carries no derivative information.
macro_rules! scalar_subset_of_dual {
  ($($t:ty),*) => {
    $(
      impl<const N: usize> SubsetOf<Dual<$t, N>> for $t {
        #[inline]
        fn to_superset(&self) -> Dual<$t, N> {
          Dual::constant(*self)
        }

        #[inline]
        fn from_superset_unchecked(element: &Dual<$t, N>) -> Self {
          element.value
        }

        #[inline]
        fn is_in_subset(element: &Dual<$t, N>) -> bool {
          element.is_constant()
        }
      }
    )*
  };
}

scalar_subset_of_dual!(f32, f64);

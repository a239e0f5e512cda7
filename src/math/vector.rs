use approx::{AbsDiffEq, RelativeEq};
use nalgebra as na;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::math::Real;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 2D vector used for positions, velocities, forces and collision axes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Vector2 {
    pub x: Real,
    pub y: Real,
}

impl Vector2 {
    /// The zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new 2D vector
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    /// Creates a new 2D vector with all components set to zero
    #[inline]
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Creates a unit vector pointing in the x direction
    #[inline]
    pub fn unit_x() -> Self {
        Self { x: 1.0, y: 0.0 }
    }

    /// Creates a unit vector pointing in the y direction
    #[inline]
    pub fn unit_y() -> Self {
        Self { x: 0.0, y: 1.0 }
    }

    /// Computes the dot product of two vectors
    #[inline]
    pub fn dot(&self, other: &Self) -> Real {
        self.x * other.x + self.y * other.y
    }

    /// Computes the z component of the 3D cross product of two vectors
    #[inline]
    pub fn cross(&self, other: &Self) -> Real {
        self.x * other.y - self.y * other.x
    }

    /// Returns the squared length of the vector
    #[inline]
    pub fn length_squared(&self) -> Real {
        self.dot(self)
    }

    /// Returns the length of the vector
    #[inline]
    pub fn length(&self) -> Real {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// A (near) zero vector is returned unchanged.
    #[inline]
    pub fn unit(&self) -> Self {
        let length = self.length();
        if length > crate::math::EPSILON {
            *self / length
        } else {
            *self
        }
    }

    /// Returns true if the vector is approximately zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        crate::math::approx_zero(self.length_squared())
    }

    /// Returns true if both components are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the vector about the origin; positive angles are counter-clockwise
    #[inline]
    pub fn rotate(&self, angle: Real) -> Self {
        Self::from_nalgebra(&(na::Rotation2::new(angle) * self.to_nalgebra()))
    }

    /// Returns the vector rotated a quarter turn counter-clockwise
    #[inline]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Distance between two points
    #[inline]
    pub fn distance(&self, other: &Self) -> Real {
        (*self - *other).length()
    }

    /// Squared distance between two points
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> Real {
        (*self - *other).length_squared()
    }

    /// The point halfway between two points
    #[inline]
    pub fn midpoint(&self, other: &Self) -> Self {
        (*self + *other) * 0.5
    }

    /// Convert to nalgebra Vector2
    #[inline]
    pub fn to_nalgebra(&self) -> na::Vector2<Real> {
        na::Vector2::new(self.x, self.y)
    }

    /// Convert from nalgebra Vector2
    #[inline]
    pub fn from_nalgebra(v: &na::Vector2<Real>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<[Real; 2]> for Vector2 {
    #[inline]
    fn from(array: [Real; 2]) -> Self {
        Self::new(array[0], array[1])
    }
}

impl From<(Real, Real)> for Vector2 {
    #[inline]
    fn from((x, y): (Real, Real)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2> for [Real; 2] {
    #[inline]
    fn from(vector: Vector2) -> Self {
        [vector.x, vector.y]
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<Real> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Real) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for Real {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Self::Output {
        Vector2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<Real> for Vector2 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Real) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<Real> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Real) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<Real> for Vector2 {
    #[inline]
    fn div_assign(&mut self, rhs: Real) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl AbsDiffEq for Vector2 {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2 {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

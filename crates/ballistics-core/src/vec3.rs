//! Fixed-size 3-vector used by the integrator.
//!
//! Thin wrapper over [`nalgebra::Vector3`] exposing only the handful of
//! operations the force model and step kernels need. Axes follow the
//! integrator's convention: +x downrange, +y up, +z right.

use nalgebra::Vector3;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3(Vector3::new(0.0, 0.0, 0.0));

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3(Vector3::new(x, y, z))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vec3(self.0.cross(&other.0))
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn normalize_or_zero(&self) -> Self {
        let n = self.norm();
        if n < 1e-12 {
            Self::ZERO
        } else {
            *self / n
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.0 += rhs.0;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3(self.0 * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Vec3 {
        Vec3(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_perpendicular() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(&b);
        assert!((c.dot(&a)).abs() < 1e-12);
        assert!((c.dot(&b)).abs() < 1e-12);
        assert!((c.z() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_or_zero_handles_zero_vector() {
        let v = Vec3::ZERO.normalize_or_zero();
        assert_eq!(v, Vec3::ZERO);
    }
}

//! Fuzzy numeric comparison policy.
//!
//! Every front/back/coplanar decision and every ray-parameter comparison in
//! this crate goes through a [`Tolerance`] value, so the tolerance behavior of
//! a tree is fixed in exactly one place. Build a tree and query it with the
//! same policy; mixing policies silently produces inconsistent classifications
//! near the boundary.

/// Default epsilon for geometric comparisons.
/// Values within this distance of each other are considered equal.
pub const DEFAULT_EPSILON: f32 = 1e-5;

/// Absolute-epsilon comparison policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f32,
}

impl Tolerance {
    /// Creates a policy with the given epsilon.
    ///
    /// # Panics (debug builds only)
    /// Panics if `epsilon` is negative or not finite.
    pub fn new(epsilon: f32) -> Self {
        debug_assert!(epsilon.is_finite() && epsilon >= 0.0);
        Self { epsilon }
    }

    /// Returns the policy's epsilon.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Returns `true` if `a` and `b` are within epsilon of each other.
    #[inline]
    pub fn eq(&self, a: f32, b: f32) -> bool {
        (a - b).abs() <= self.epsilon
    }

    /// Returns `true` if `a` is within epsilon of zero.
    #[inline]
    pub fn eq_zero(&self, a: f32) -> bool {
        a.abs() <= self.epsilon
    }

    /// Returns `true` if `a` is greater than `b` by more than epsilon.
    #[inline]
    pub fn gt(&self, a: f32, b: f32) -> bool {
        a - b > self.epsilon
    }

    /// Returns `true` if `a` is less than `b` by more than epsilon.
    #[inline]
    pub fn lt(&self, a: f32, b: f32) -> bool {
        b - a > self.epsilon
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_respect_epsilon() {
        let tol = Tolerance::new(0.01);

        assert!(tol.eq(1.0, 1.005));
        assert!(!tol.eq(1.0, 1.02));

        assert!(tol.gt(1.02, 1.0));
        assert!(!tol.gt(1.005, 1.0));

        assert!(tol.lt(1.0, 1.02));
        assert!(!tol.lt(1.0, 1.005));

        assert!(tol.eq_zero(-0.005));
        assert!(!tol.eq_zero(0.02));
    }
}

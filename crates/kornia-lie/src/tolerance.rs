/// Default relative tolerance of every closeness check.
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Default absolute tolerance of every closeness check.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Numerical tolerance used when validating rotations and transforms.
///
/// A value `a` is close to a reference `b` when `|a - b| <= atol + rtol * |b|`. The same pair is
/// used for `M · Mᵗ ≈ I`, for `det(M) ≈ 1` and for the homogeneous entry of SE3 matrices.
///
/// Note that comparing against zero only uses `atol`, so `f32` data usually needs a looser
/// tolerance than the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Tolerance {
    /// Create a new tolerance from a relative and an absolute part.
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(DEFAULT_RTOL, DEFAULT_ATOL)
    }
}

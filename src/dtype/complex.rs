//! Double-precision complex value type
//!
//! Storage is interleaved (re, im), matching the layout used by numeric
//! interchange formats, and is `Pod` for zero-copy buffer handling.

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// 128-bit complex number with f64 real and imaginary parts
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Complex128 {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex128 {
    /// Zero complex number
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Create a new complex number
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// True when both parts are exactly zero
    #[inline]
    pub fn is_zero(self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl From<f64> for Complex128 {
    #[inline]
    fn from(re: f64) -> Self {
        Self { re, im: 0.0 }
    }
}

impl fmt::Display for Complex128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 || (self.im == 0.0 && self.im.is_sign_negative()) {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

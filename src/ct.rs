//======================================================================
// src/ct.rs
// Timing-safe byte-buffer helpers.
//======================================================================

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Constant-time equality of two byte buffers.
///
/// Runs in time dependent only on the buffer length, never
/// short-circuiting on the first mismatch. Two empty buffers compare
/// equal; buffers of different lengths compare unequal immediately
/// (lengths are public).
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Overwrite a buffer with zeros in a way the optimizer cannot elide.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}

//! Common types and utilities shared by the interrupt controller
//!
//! Type aliases match Game Boy hardware widths; the bit helpers are used
//! for packing and unpacking the memory-mapped register views.

/// 8-bit unsigned integer (Game Boy byte)
pub type Byte = u8;

/// 16-bit unsigned integer (Game Boy word)
pub type Word = u16;

/// Check if bit `n` is set in a byte value
#[inline]
pub fn bit(value: Byte, n: u8) -> bool {
    (value & (1 << n)) != 0
}

/// Set or clear bit `n` of a byte value
#[inline]
pub fn bit_set(value: &mut Byte, n: u8, on: bool) {
    if on {
        *value |= 1 << n;
    } else {
        *value &= !(1 << n);
    }
}

//! Read-modify-write masks for 32-bit registers.
//!
//! For a bitfield of `width` bits starting at `offset`, the generated macro
//! holds the AND-mask that clears the field while preserving every other
//! bit: exactly `width` zero bits at `offset..offset + width`, ones
//! everywhere else.

use thiserror::Error;

/// A bit range that no 32-bit mask can express.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("bit range of width {width} at offset {offset} does not fit a 32-bit register")]
pub struct BitRangeError {
    pub width: u32,
    pub offset: u32,
}

/// Checks that a `width`-bit field at `offset` fits a 32-bit register
/// (`1 <= width` and `offset + width <= 32`).
pub fn check_range(width: u32, offset: u32) -> Result<(), BitRangeError> {
    if width == 0 || width > 32 || offset > 31 || offset > 32 - width {
        return Err(BitRangeError { width, offset });
    }
    Ok(())
}

/// Computes the preserve-other-bits mask for a `width`-bit field at
/// `offset`: open a `width`-bit hole at the bottom of an all-ones word,
/// then walk it up `offset` places, refilling with ones from the right.
/// Rejects ranges [`check_range`] rejects instead of letting the hole wrap
/// past bit 31.
pub fn clear_mask(width: u32, offset: u32) -> Result<u32, BitRangeError> {
    check_range(width, offset)?;
    let mut mask = if width == 32 { 0 } else { u32::MAX << width };
    for _ in 0..offset {
        mask = mask << 1 | 1;
    }
    Ok(mask)
}

/// Renders a mask the way the macros spell it: `0x` plus eight uppercase
/// hex digits.
pub fn format_mask(mask: u32) -> String {
    format!("0x{mask:08X}")
}

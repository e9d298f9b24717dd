//! # Ranksel
//!
//! An append-only bit-vector with constant-time rank and near-constant-time
//! select queries.
//!
//! The structure follows the *Combined Sampling* scheme of Navarro and
//! Providel ("Fast, Small, Simple Rank/Select on Bitmaps", SEA 2012): a
//! packed 64-bit-word bitmap is augmented with two small tables, a rank
//! sample every [`Options::rank_sample_bits`] bits and a word-aligned
//! select pointer every [`Options::select_sample_ones`] ones. Both tables
//! are kept in sync incrementally on every append, so the vector never
//! needs a separate build step.
//!
//! ## Quick Start
//!
//! ```
//! use ranksel::BitVec;
//!
//! let mut bv = BitVec::new();
//! bv.append(0b1011, 4);
//!
//! assert_eq!(bv.len(), 4);
//! assert_eq!(bv.rank1(2), 2); // ones in positions 0..=2
//! assert_eq!(bv.select1(3), 3); // the 3rd one sits at index 3
//! ```
//!
//! ## Conventions
//!
//! - Bits are LSB-first: `append(value, width)` places bit 0 of `value` at
//!   the lowest new index.
//! - `rank1(i)` and `rank0(i)` count positions `[0, i]` *inclusive*.
//! - `select1(k)` and `select0(k)` are 1-indexed.
//! - Out-of-range arguments are programmer errors and panic.
//!
//! ## Features
//!
//! - `std` (default) - build against std instead of core + alloc
//! - `serde` - serialization/deserialization support
//! - `portable-popcount` - portable bitwise popcount (no intrinsics)

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod bitmap;
mod bitvec;
mod broadword;
mod popcount;
mod rank;
mod select;

pub use bitmap::Bitmap;
pub use bitvec::BitVec;
pub use broadword::{rank_in_word, select_in_word};
pub use popcount::{popcount_word, popcount_words};
pub use rank::RankSamples;
pub use select::SelectPointers;

/// Sampling parameters for the auxiliary rank/select tables.
///
/// Both values must be nonzero multiples of 64; [`BitVec::with_options`]
/// panics otherwise. Powers of two are recommended (divisions compile to
/// shifts) but not required - these are tuning knobs, not correctness
/// parameters. Smaller values answer queries faster at the cost of more
/// auxiliary memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    /// Bits covered by one rank sampling block (default: 1024).
    pub rank_sample_bits: usize,
    /// Ones grouped under one select pointer (default: 8192).
    pub select_sample_ones: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            rank_sample_bits: 1024,
            select_sample_ones: 8192,
        }
    }
}

//! Append-only bit-vector with rank/select support.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::broadword::{low_bits, rank_in_word, select_in_word};
use crate::popcount::{popcount_word, popcount_words};
use crate::rank::RankSamples;
use crate::select::SelectPointers;
use crate::Options;

/// An append-only bit-vector answering rank and select in constant or
/// near-constant time, using the combined-sampling scheme of Navarro and
/// Providel (SEA 2012).
///
/// Appends keep two auxiliary tables in sync: a cumulative popcount every
/// [`Options::rank_sample_bits`] bits and a word-aligned pointer per
/// [`Options::select_sample_ones`] ones. `rank1` jumps to the enclosing
/// sample and scans at most one block of words; `select1` jumps through a
/// pointer, walks a bounded run of rank samples, then scans one block.
/// `select0` has no pointer table and instead binary-searches the zero
/// counts derived from the rank samples.
///
/// # Example
///
/// ```
/// use ranksel::BitVec;
///
/// let mut bv = BitVec::new();
/// bv.append(0b1100_1101, 8);
///
/// assert_eq!(bv.rank1(3), 3);
/// assert_eq!(bv.rank0(3), 1);
/// assert_eq!(bv.select1(4), 6);
/// assert_eq!(bv.select0(2), 4);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitVec {
    /// Packed bit storage
    bits: Bitmap,
    /// Cumulative popcount every `rank_sample_bits` bits
    ranks: RankSamples,
    /// Word-aligned pointer per `select_sample_ones` ones
    pointers: SelectPointers,
    /// Total number of 1-bits
    ones: u64,
}

impl BitVec {
    /// Create an empty bit-vector with default sampling parameters.
    pub fn new() -> Self {
        Self::with_capacity_and_options(0, Options::default())
    }

    /// Create an empty bit-vector with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self::with_capacity_and_options(bits, Options::default())
    }

    /// Create an empty bit-vector with custom sampling parameters.
    ///
    /// # Panics
    ///
    /// Panics if either option is zero or not a multiple of 64.
    pub fn with_options(opts: Options) -> Self {
        Self::with_capacity_and_options(0, opts)
    }

    /// Create an empty bit-vector with a capacity hint and custom sampling
    /// parameters. All three backing arrays are pre-reserved from the hint.
    ///
    /// # Panics
    ///
    /// Panics if either option is zero or not a multiple of 64.
    pub fn with_capacity_and_options(bits: usize, opts: Options) -> Self {
        assert!(
            opts.rank_sample_bits > 0 && opts.rank_sample_bits % 64 == 0,
            "rank_sample_bits {} must be a nonzero multiple of 64",
            opts.rank_sample_bits
        );
        assert!(
            opts.select_sample_ones > 0 && opts.select_sample_ones % 64 == 0,
            "select_sample_ones {} must be a nonzero multiple of 64",
            opts.select_sample_ones
        );

        Self {
            bits: Bitmap::with_capacity(bits),
            ranks: RankSamples::with_capacity(opts.rank_sample_bits, bits),
            pointers: SelectPointers::with_capacity(opts.select_sample_ones, bits),
            ones: 0,
        }
    }

    /// Append the low `width` bits of `value`, LSB first.
    ///
    /// Bits of `value` at positions `width` and above are ignored. Both
    /// auxiliary tables are updated in the same call; no rebuild is ever
    /// needed. Amortised O(1).
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or greater than 64. Width is validated before
    /// any state changes.
    pub fn append(&mut self, value: u64, width: u32) {
        // Validates width, masks the value, and keeps the tail word zeroed
        self.bits.append(value, width);

        let value = low_bits(value, width);
        let appended = popcount_word(value) as u64;
        self.ones += appended;

        self.ranks
            .record_append(self.bits.len(), self.ones, value, width, appended);
        self.pointers
            .record_append(self.bits.len(), width, self.ones, value, appended);
    }

    /// Read the bit at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits.get(i)
    }

    /// Count the 1-bits in positions `[0, i]`, *including* position `i`.
    ///
    /// Jumps to the enclosing rank sample and scans at most
    /// `rank_sample_bits / 64` words.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`. `rank1(len())` is rejected even though it
    /// would be well defined; use [`count_ones`](Self::count_ones) for the
    /// total.
    pub fn rank1(&self, i: usize) -> usize {
        assert!(
            i < self.bits.len(),
            "index {} out of bounds (len={})",
            i,
            self.bits.len()
        );

        let block = self.ranks.block_of(i);
        let start = self.ranks.block_start_word(block);
        let last = i / 64;

        let words = self.bits.words();
        let before = popcount_words(&words[start..last]) as u64;
        let within = rank_in_word(words[last], (i % 64) as u32) as u64;

        (self.ranks.rank_at_block(block) + before + within) as usize
    }

    /// Count the 0-bits in positions `[0, i]`, *including* position `i`.
    ///
    /// Defined as `i + 1 - rank1(i)`, so the inclusive convention matches
    /// `rank1`: `rank0(i) + rank1(i) == i + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[inline]
    pub fn rank0(&self, i: usize) -> usize {
        i + 1 - self.rank1(i)
    }

    /// Index of the k-th 1-bit (k is 1-indexed): the smallest `i` with
    /// `rank1(i) == k`.
    ///
    /// Jumps through the select pointer for k's block, walks at most
    /// `select_sample_ones / rank_sample_bits + 1` rank samples, then scans
    /// one block of words.
    ///
    /// # Panics
    ///
    /// Panics if `k == 0` or `k > count_ones()`.
    pub fn select1(&self, k: usize) -> usize {
        assert!(k > 0, "select1 rank must be greater than 0");
        assert!(
            k as u64 <= self.ones,
            "select1 rank {} exceeds number of ones ({})",
            k,
            self.ones
        );
        let k = k as u64;

        // The pointer undershoots the target's rank block, never overshoots
        let mut block = self.pointers.pointer_for(k) as usize / self.ranks.bits_per_block();
        while block + 1 < self.ranks.len() && self.ranks.rank_at_block(block + 1) < k {
            block += 1;
        }

        let start = self.ranks.block_start_word(block);
        let mut rank = self.ranks.rank_at_block(block);
        let words = self.bits.words();
        for (off, &word) in words[start..].iter().enumerate() {
            let pop = popcount_word(word) as u64;
            if rank + pop >= k {
                // k - rank - 1 ones of this word precede the target
                let pos = select_in_word(word, (k - rank - 1) as u32) as usize;
                return (start + off) * 64 + pos;
            }
            rank += pop;
        }
        unreachable!("select1: ran off the bitmap");
    }

    /// Index of the k-th 0-bit (k is 1-indexed): the smallest `i` with
    /// `rank0(i) == k`.
    ///
    /// There is no pointer table for zeros: the query binary-searches the
    /// zero counts derived from the rank samples, then scans one block of
    /// inverted words. O(log(len / rank_sample_bits)) plus the block scan;
    /// slower than `select1` on dense bitmaps, faster on very sparse ones.
    ///
    /// # Panics
    ///
    /// Panics if `k == 0` or `k > count_zeros()`.
    pub fn select0(&self, k: usize) -> usize {
        assert!(k > 0, "select0 rank must be greater than 0");
        assert!(
            k <= self.count_zeros(),
            "select0 rank {} exceeds number of zeros ({})",
            k,
            self.count_zeros()
        );
        let k = k as u64;

        let block = self.ranks.zero_block_before(k);
        let start = self.ranks.block_start_word(block);
        let mut rank = (block * self.ranks.bits_per_block()) as u64 - self.ranks.rank_at_block(block);

        // The tail word's unused bits are zero, so `!word` holds spurious
        // ones past `len`. They sit above every genuine zero of that word,
        // and k <= count_zeros() means the target is found first.
        let words = self.bits.words();
        for (off, &word) in words[start..].iter().enumerate() {
            let flipped = !word;
            let pop = popcount_word(flipped) as u64;
            if rank + pop >= k {
                let pos = select_in_word(flipped, (k - rank - 1) as u32) as usize;
                return (start + off) * 64 + pos;
            }
            rank += pop;
        }
        unreachable!("select0: ran off the bitmap");
    }

    /// Number of bits in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if no bits have been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Total number of 1-bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.ones as usize
    }

    /// Total number of 0-bits.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.bits.len() - self.ones as usize
    }

    /// Bytes held by the bitmap and both auxiliary tables.
    pub fn size_bytes(&self) -> usize {
        self.bits.size_bytes() + self.ranks.size_bytes() + self.pointers.size_bytes()
    }

    /// Raw word storage. Bits past `len` in the last word are zero.
    #[inline]
    pub fn words(&self) -> &[u64] {
        self.bits.words()
    }
}

impl Default for BitVec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BitVec {
    /// Binary dump, highest word first, each labelled with its bit-index
    /// range. Bit 0 of the vector is the rightmost digit of the rightmost
    /// word, making the LSB-first convention visible.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.bits.words().iter().enumerate().rev() {
            if i + 1 < self.bits.words().len() {
                write!(f, " ")?;
            }
            write!(f, "{:064b} [{}-{}]", word, i * 64 + 63, i * 64)?;
        }
        Ok(())
    }
}

//! Fixed-capacity bitset over dense tile indices.

const WORD_BITS: usize = 64;

/// A set of dense tile indices in `0..capacity`, stored as packed `u64` words.
///
/// This is the possibility-set representation used by the solver: one bit per
/// catalog tile, so intersection and union during propagation are word-wide
/// operations instead of per-element hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBitset {
    words: Vec<u64>,
    capacity: usize,
}

impl TileBitset {
    /// The empty set over `capacity` tile indices.
    pub fn empty(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// The full set containing every index in `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self::empty(capacity);
        for word in &mut set.words {
            *word = u64::MAX;
        }
        set.mask_tail();
        set
    }

    /// Clear any bits above `capacity` so `len` stays honest.
    fn mask_tail(&mut self) {
        let tail = self.capacity % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }

    /// Number of indices this set can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of indices currently in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.capacity && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < self.capacity);
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Replace the contents with the single index `index`.
    pub fn set_singleton(&mut self, index: usize) {
        for word in &mut self.words {
            *word = 0;
        }
        self.insert(index);
    }

    /// `self ∪= other`. Both sets must share a capacity.
    pub fn union_with(&mut self, other: &TileBitset) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst |= src;
        }
    }

    /// `self ∩= other`. Both sets must share a capacity.
    pub fn intersect_with(&mut self, other: &TileBitset) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst &= src;
        }
    }

    /// Iterate the contained indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(word_idx * WORD_BITS + bit)
            })
        })
    }

    /// The sole contained index, if the set is a singleton.
    pub fn single(&self) -> Option<usize> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }
}

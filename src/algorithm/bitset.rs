use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

/// Fixed-size bitset over unit ids
///
/// Backs both the per-cell domains during solving and the per-direction
/// compatibility sets in the distribution. Ids are the catalog's dense
/// 0-based ids, so membership tests and set intersections are O(1) per word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitBitset {
    bits: BitVec,
    capacity: usize,
}

impl UnitBitset {
    /// Create a bitset with no ids present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Create a bitset containing every id below the capacity
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
            capacity,
        }
    }

    /// Insert an id; out-of-range ids are ignored
    pub fn insert(&mut self, id: usize) {
        if id < self.capacity {
            self.bits.set(id, true);
        }
    }

    /// Remove an id, reporting whether it was present
    pub fn remove(&mut self, id: usize) -> bool {
        if id < self.capacity && self.bits.get(id).as_deref() == Some(&true) {
            self.bits.set(id, false);
            return true;
        }
        false
    }

    /// Test id membership
    pub fn contains(&self, id: usize) -> bool {
        self.bits.get(id).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Merge another bitset into this one in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no ids are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count ids in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The single remaining id, if exactly one is present
    pub fn sole_member(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// Extract all member ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for UnitBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitBitset({} ids: {:?})", self.count(), self.to_vec())
    }
}

//! Canonical unit storage and deduplication
//!
//! A unit is a fixed-shape block of normalized pixel samples. The catalog
//! assigns dense integer ids in first-seen order and guarantees that
//! bit-identical blocks share an id. Everything downstream (grids, the
//! distribution, the solver) refers to units only by id.

use ndarray::Array3;
use std::collections::HashMap;

/// An immutable block of color samples with shape (height, width, channels)
///
/// Sample values are expected in [0, 1]. Two units are equal iff every
/// sample matches exactly; equality is defined over the f64 bit patterns so
/// deduplication never merges nearly-equal blocks.
#[derive(Debug, Clone)]
pub struct Unit {
    samples: Array3<f64>,
}

impl Unit {
    /// Wrap a sample block as a unit
    pub const fn new(samples: Array3<f64>) -> Self {
        Self { samples }
    }

    /// Create a uniform unit filled with a single background value
    pub fn uniform(shape: (usize, usize, usize), value: f64) -> Self {
        Self {
            samples: Array3::from_elem(shape, value),
        }
    }

    /// Shape of the sample block as (height, width, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.samples.dim()
    }

    /// Access the raw sample block
    pub const fn samples(&self) -> &Array3<f64> {
        &self.samples
    }

    /// Exact identity key over the sample bit patterns
    ///
    /// The shape is folded into the key so blocks of different shapes never
    /// collide even when their flattened samples agree.
    fn key(&self) -> UnitKey {
        let (h, w, c) = self.samples.dim();
        let mut bits = Vec::with_capacity(h * w * c + 3);
        bits.push(h as u64);
        bits.push(w as u64);
        bits.push(c as u64);
        bits.extend(self.samples.iter().map(|sample| sample.to_bits()));
        bits
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Unit {}

type UnitKey = Vec<u64>;

/// Bidirectional id ↔ unit mapping built incrementally by the generators
///
/// Ids are dense, contiguous, and stable for the lifetime of the catalog.
/// The blank unit is registered like any other unit once its shape is known,
/// so it participates in adjacency statistics and can mark contradictions.
#[derive(Debug, Default)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    index: HashMap<UnitKey, usize>,
    blank: Option<usize>,
}

impl UnitCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit, reusing the existing id for bit-identical blocks
    pub fn register(&mut self, unit: Unit) -> usize {
        let key = unit.key();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.units.len();
        self.index.insert(key, id);
        self.units.push(unit);
        id
    }

    /// Register the blank unit for the given block shape and background value
    ///
    /// Idempotent: repeated calls return the id assigned on the first call.
    pub fn ensure_blank(&mut self, shape: (usize, usize, usize), value: f64) -> usize {
        if let Some(id) = self.blank {
            return id;
        }
        let id = self.register(Unit::uniform(shape, value));
        self.blank = Some(id);
        id
    }

    /// Id of the blank unit, if one has been registered
    pub const fn blank_id(&self) -> Option<usize> {
        self.blank
    }

    /// Look up the unit for an id
    pub fn get(&self, id: usize) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Number of registered units (including the blank unit, once registered)
    pub const fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the catalog holds no units
    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

//! Chronological backtracking over an explicit removal log
//!
//! Every collapse opens a choice point and every domain removal (from the
//! collapse itself or from propagation it triggered) is appended to the log.
//! On contradiction the trail rewinds: removals are undone back to the most
//! recent choice point with untried alternatives, which is then retried.
//! An empty choice stack means the statistics admit no solution.

use crate::algorithm::wave::Wave;

/// One id removed from one cell's domain
#[derive(Debug, Clone, Copy)]
pub struct Removal {
    /// Cell index the id was removed from
    pub cell: usize,
    /// The removed unit id
    pub id: usize,
}

/// A collapse decision that may still have untried alternatives
#[derive(Debug, Clone)]
pub struct ChoicePoint {
    /// Cell that was collapsed
    pub cell: usize,
    /// Alternatives not yet tried, in ascending id order
    pub untried: Vec<usize>,
    /// Length of the removal log when this choice was opened
    pub log_len: usize,
}

/// The backtracking state of one generation run
#[derive(Debug, Default)]
pub struct Trail {
    removals: Vec<Removal>,
    choices: Vec<ChoicePoint>,
}

impl Trail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a domain removal so it can be undone
    pub fn record(&mut self, cell: usize, id: usize) {
        self.removals.push(Removal { cell, id });
    }

    /// Open a choice point for a collapse about to be applied
    ///
    /// Must be called before the collapse's own removals are recorded so the
    /// log position captures the pre-collapse domains.
    pub fn open_choice(&mut self, cell: usize, untried: Vec<usize>) {
        let log_len = self.removals.len();
        self.choices.push(ChoicePoint {
            cell,
            untried,
            log_len,
        });
    }

    /// Rewind to the most recent choice point with an untried alternative
    ///
    /// Undoes logged removals while popping exhausted choice points. Returns
    /// the cell to re-collapse, the next id to try (highest untried id
    /// first), and the alternatives that remain after it — or `None` when
    /// every choice point is exhausted.
    pub fn rewind(&mut self, wave: &mut Wave) -> Option<(usize, usize, Vec<usize>)> {
        loop {
            let choice = self.choices.pop()?;
            while self.removals.len() > choice.log_len {
                if let Some(removal) = self.removals.pop() {
                    wave.restore(removal.cell, removal.id);
                }
            }
            let mut untried = choice.untried;
            if let Some(next) = untried.pop() {
                return Some((choice.cell, next, untried));
            }
        }
    }
}

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Pairs
// ---------------------------------------------------------------------------

/// A destroyed address believed to be a created address under a new name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MatchPair {
    pub old: String,
    pub new: String,
}

impl MatchPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Fuzzy-stage pairing proposal. Lower distance = more similar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub distance: usize,
    pub create: String,
    pub destroy: String,
}

impl Candidate {
    pub fn shares_endpoint(&self, other: &Candidate) -> bool {
        self.create == other.create || self.destroy == other.destroy
    }
}

// ---------------------------------------------------------------------------
// Match table
// ---------------------------------------------------------------------------

/// Both directions of a set of pairs: `up` is old -> new, `down` is new -> old.
///
/// The two maps are only ever written together, so `up[o] == n` iff
/// `down[n] == o`, and no address is reused across pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTable {
    up: BTreeMap<String, String>,
    down: BTreeMap<String, String>,
}

impl MatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a pair, refusing an old or new address that is already paired.
    pub fn try_insert(&mut self, pair: MatchPair) -> Result<(), ReconError> {
        self.check_free(&pair)?;
        self.record(pair);
        Ok(())
    }

    fn check_free(&self, pair: &MatchPair) -> Result<(), ReconError> {
        if self.up.contains_key(&pair.old) {
            return Err(ReconError::AddressReused { address: pair.old.clone() });
        }
        if self.down.contains_key(&pair.new) {
            return Err(ReconError::AddressReused { address: pair.new.clone() });
        }
        Ok(())
    }

    /// Commit a pair the caller has already proven disjoint.
    pub(crate) fn record(&mut self, pair: MatchPair) {
        debug_assert!(!self.up.contains_key(&pair.old));
        debug_assert!(!self.down.contains_key(&pair.new));
        self.down.insert(pair.new.clone(), pair.old.clone());
        self.up.insert(pair.old, pair.new);
    }

    /// Fold another table in. Fails without partial writes on overlap.
    pub fn merge(&mut self, other: MatchTable) -> Result<(), ReconError> {
        for pair in other.pairs() {
            self.check_free(&pair)?;
        }
        for pair in other.pairs() {
            self.record(pair);
        }
        Ok(())
    }

    pub fn up(&self) -> &BTreeMap<String, String> {
        &self.up
    }

    pub fn down(&self) -> &BTreeMap<String, String> {
        &self.down
    }

    /// Pairs sorted by old address.
    pub fn pairs(&self) -> impl Iterator<Item = MatchPair> + '_ {
        self.up.iter().map(|(old, new)| MatchPair::new(old, new))
    }

    pub fn len(&self) -> usize {
        self.up.len()
    }

    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub exact: usize,
    pub fuzzy: usize,
    pub unmatched_create: usize,
    pub unmatched_destroy: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub table: MatchTable,
    pub residue: crate::residue::Residue,
    pub summary: ReconSummary,
}

impl Reconciliation {
    /// True when every address ended up in a pair.
    pub fn is_complete(&self) -> bool {
        self.residue.is_empty()
    }
}

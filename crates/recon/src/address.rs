use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ReconError;

/// Deduplicated set of resource addresses.
///
/// Backed by an ordered set: every iteration is lexicographic, so matching
/// order, diagnostics and generated scripts never depend on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AddressSet {
    members: BTreeSet<String>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from many addresses, rejecting any empty one.
    pub fn from_addresses<I, S>(addresses: I) -> Result<Self, ReconError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for address in addresses {
            set.add(address)?;
        }
        Ok(set)
    }

    /// Insert an address. Returns `false` if it was already present.
    pub fn add(&mut self, address: impl Into<String>) -> Result<bool, ReconError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ReconError::EmptyAddress);
        }
        Ok(self.members.insert(address))
    }

    /// Remove an address. Absent addresses are ignored.
    pub fn remove(&mut self, address: &str) -> bool {
        self.members.remove(address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    /// All current members. Same order as [`iter`](Self::iter).
    pub fn list(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Owned snapshot of the members in lexicographic order.
    pub fn sorted(&self) -> Vec<String> {
        self.members.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a AddressSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

use std::fmt;

use serde::Serialize;

use crate::address::AddressSet;
use crate::model::{MatchTable, ReconSummary};

/// Addresses left unpaired after matching, each side sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Residue {
    pub create: Vec<String>,
    pub destroy: Vec<String>,
}

impl Residue {
    pub fn from_sets(create: &AddressSet, destroy: &AddressSet) -> Self {
        Self {
            create: create.sorted(),
            destroy: destroy.sorted(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.destroy.is_empty()
    }
}

/// Human-readable diagnostic; an empty side is omitted.
///
/// ```text
/// unmatched create:
///   aws_route53_record.private["artifactory"]
/// unmatched destroy:
///   aws_route53_record.artifactory_private
/// ```
impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (label, addresses) in [("create", &self.create), ("destroy", &self.destroy)] {
            if addresses.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "unmatched {label}:")?;
            for address in addresses {
                write!(f, "\n  {address}")?;
            }
        }
        Ok(())
    }
}

/// Counts for one reconciliation run.
pub fn compute_summary(exact: &MatchTable, fuzzy: &MatchTable, residue: &Residue) -> ReconSummary {
    ReconSummary {
        exact: exact.len(),
        fuzzy: fuzzy.len(),
        unmatched_create: residue.create.len(),
        unmatched_destroy: residue.destroy.len(),
    }
}

use crate::address::AddressSet;
use crate::config::MatchOptions;
use crate::error::ReconError;
use crate::matcher::{match_exact, match_fuzzy};
use crate::model::{MatchTable, Reconciliation};
use crate::residue::{compute_summary, Residue};

/// Reconcile one plan's created and destroyed addresses.
///
/// Exact matching always runs. Fuzzy matching runs only when allowed and
/// exact matching left something on both sides. Pairs from both stages are
/// merged into one table; whatever stays unpaired is returned as residue
/// for the caller to judge.
pub fn run(
    mut create: AddressSet,
    mut destroy: AddressSet,
    options: &MatchOptions,
) -> Result<Reconciliation, ReconError> {
    let mut table = match_exact(&mut create, &mut destroy);

    let fuzzy = if options.fuzzy && !create.is_empty() && !destroy.is_empty() {
        match_fuzzy(&mut create, &mut destroy)?
    } else {
        MatchTable::new()
    };

    let residue = Residue::from_sets(&create, &destroy);
    let summary = compute_summary(&table, &fuzzy, &residue);
    table.merge(fuzzy)?;

    Ok(Reconciliation {
        table,
        residue,
        summary,
    })
}

use crate::address::AddressSet;
use crate::error::ReconError;
use crate::model::{Candidate, MatchPair, MatchTable};
use crate::qgram::qgram_distance;

/// Pair destroyed and created addresses where one is a suffix of the other.
///
/// `c.ends_with(d)` is a move into a module, `d.ends_with(c)` a move out of
/// one. Destroy addresses are visited in sorted order and each takes the
/// first free create address (also sorted) that qualifies. Both sides are
/// removed before the next destroy address is considered, so no address is
/// ever paired twice.
///
/// Matched addresses are removed from both sets; what is left is residue.
pub fn match_exact(create: &mut AddressSet, destroy: &mut AddressSet) -> MatchTable {
    let mut table = MatchTable::new();

    for d in destroy.sorted() {
        let hit = create
            .iter()
            .find(|c| c.ends_with(d.as_str()) || d.ends_with(*c))
            .map(str::to_owned);

        if let Some(c) = hit {
            create.remove(&c);
            destroy.remove(&d);
            table.record(MatchPair::new(d, c));
        }
    }

    table
}

/// Every (create, destroy) combination with its q-gram distance, ascending.
///
/// Built destroy-major over the sorted sets and sorted stably, so equal
/// distances keep a reproducible order.
pub fn rank_candidates(create: &AddressSet, destroy: &AddressSet) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(create.len() * destroy.len());
    for d in destroy.iter() {
        for c in create.iter() {
            candidates.push(Candidate {
                distance: qgram_distance(d, c),
                create: c.to_string(),
                destroy: d.to_string(),
            });
        }
    }
    candidates.sort_by_key(|c| c.distance);
    candidates
}

/// Greedy nearest-neighbour pairing of whatever `match_exact` left behind.
///
/// Takes the closest remaining candidate each round. If another candidate at
/// the same distance shares its create or destroy address there is no way to
/// choose between them, and the whole stage fails with
/// [`ReconError::AmbiguousMigration`] leaving both sets untouched.
pub fn match_fuzzy(
    create: &mut AddressSet,
    destroy: &mut AddressSet,
) -> Result<MatchTable, ReconError> {
    let mut candidates = rank_candidates(create, destroy);
    let mut table = MatchTable::new();

    while !candidates.is_empty() {
        let best = candidates.remove(0);

        if let Some(rival) = candidates
            .iter()
            .take_while(|c| c.distance == best.distance)
            .find(|c| c.shares_endpoint(&best))
        {
            return Err(ReconError::AmbiguousMigration {
                first: (best.create, best.destroy),
                second: (rival.create.clone(), rival.destroy.clone()),
            });
        }

        candidates.retain(|c| !c.shares_endpoint(&best));
        table.record(MatchPair::new(best.destroy, best.create));
    }

    for pair in table.pairs() {
        destroy.remove(&pair.old);
        create.remove(&pair.new);
    }

    Ok(table)
}

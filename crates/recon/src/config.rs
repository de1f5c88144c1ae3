use serde::Deserialize;

/// Caller-controlled switches for one reconciliation run.
///
/// Deserializable so front ends can embed it in their own config files
/// (e.g. a `[match]` table).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    /// Run the q-gram matcher on whatever exact matching leaves behind.
    /// The resulting pairs must be reviewed by hand.
    pub fuzzy: bool,
}

impl MatchOptions {
    pub fn exact_only() -> Self {
        Self { fuzzy: false }
    }

    pub fn with_fuzzy() -> Self {
        Self { fuzzy: true }
    }
}

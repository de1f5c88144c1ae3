use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// An empty or whitespace-only address was offered to an AddressSet.
    EmptyAddress,
    /// An address was committed to a second pair.
    AddressReused { address: String },
    /// Two minimal-distance fuzzy candidates share an endpoint.
    /// Both pairs are stored as (create, destroy).
    AmbiguousMigration {
        first: (String, String),
        second: (String, String),
    },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::AddressReused { address } => {
                write!(f, "address '{address}' already belongs to another pair")
            }
            Self::AmbiguousMigration { first, second } => write!(
                f,
                "ambiguous migration: {{{}}} -> {{{}}} or {{{}}} -> {{{}}}",
                first.0, first.1, second.0, second.1
            ),
        }
    }
}

impl std::error::Error for ReconError {}

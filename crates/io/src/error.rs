use std::fmt;
use std::path::PathBuf;

use terravalet_recon::ReconError;

/// Errors raised while reading plans and import definitions.
#[derive(Debug)]
pub enum PlanError {
    /// File could not be opened or is not UTF-8.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A change whose action the reader does not know how to classify.
    UnexpectedAction { location: String, action: String },
    /// Plan document is not valid JSON or has the wrong shape.
    Json(String),
    /// A resource change is missing something every change must carry.
    MalformedChange { address: String, reason: String },
    /// An address the plan names was rejected by the address set.
    Address { address: String, source: ReconError },
    /// Import definitions file is not valid JSON or has the wrong shape.
    Definitions(String),
    NoResourcesToCreate,
    OnlyUndefinedResources,
    MissingField { resource_type: String, field: String },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Read { path, source } => {
                write!(f, "reading {}: {source}", path.display())
            }
            PlanError::UnexpectedAction { location, action } => {
                write!(f, "{location}, unexpected action \"{action}\"")
            }
            PlanError::Json(msg) => write!(f, "parsing the plan: {msg}"),
            PlanError::MalformedChange { address, reason } => {
                write!(f, "resource change '{address}': {reason}")
            }
            PlanError::Address { address, source } => {
                write!(f, "address {address:?}: {source}")
            }
            PlanError::Definitions(msg) => write!(f, "parsing resources definitions: {msg}"),
            PlanError::NoResourcesToCreate => {
                write!(f, "src-plan doesn't contain resources to create")
            }
            PlanError::OnlyUndefinedResources => {
                write!(f, "src-plan contains only undefined resources")
            }
            PlanError::MissingField { resource_type, field } => write!(
                f,
                "error in resources definition {resource_type}: field '{field}' doesn't exist in plan"
            ),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Read { source, .. } => Some(source),
            PlanError::Address { source, .. } => Some(source),
            _ => None,
        }
    }
}

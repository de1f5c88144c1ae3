// Plan and import-definition readers

pub mod error;
pub mod import;
pub mod plan;

pub use error::PlanError;
pub use import::{build_imports, load_definitions, Definitions, ImportDefinition, ImportEntry, ImportPlan};
pub use plan::{load_plan, parse_plan, PlanDocument, PlanFormat, PlannedChanges};

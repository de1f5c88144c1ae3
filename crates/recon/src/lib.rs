//! `terravalet-recon`: pairs destroyed and created Terraform addresses.
//!
//! Pure engine crate: receives two address sets, returns a match table plus
//! whatever could not be paired. No CLI, IO or logging.

pub mod address;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod qgram;
pub mod residue;

pub use address::AddressSet;
pub use config::MatchOptions;
pub use engine::run;
pub use error::ReconError;
pub use model::{MatchPair, MatchTable, ReconSummary, Reconciliation};
pub use residue::Residue;

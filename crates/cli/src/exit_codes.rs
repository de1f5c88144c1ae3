//! CLI Exit Code Registry
//!
//! Single source of truth for every exit code `terravalet` returns.
//! Generated scripts are usually driven from CI, so these are part of the
//! shell contract.
//!
//! | Code | Meaning                                                 |
//! |------|---------------------------------------------------------|
//! | 0    | Success, scripts written                                |
//! | 1    | General error (unspecified)                             |
//! | 2    | CLI usage error (bad args)                              |
//! | 3    | Addresses left unmatched                                |
//! | 4    | Ambiguous fuzzy migration                               |
//! | 5    | Plan or definitions file could not be parsed            |
//! | 6    | File could not be read or written                       |
//! | 7    | Config file invalid                                     |
//! | 8    | Plan contents violate the command's contract            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `CliError` or the command's error handling

/// Success - scripts written.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. Clap exits with the same code.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

/// Matching finished but some created or destroyed addresses have no partner.
pub const EXIT_UNMATCHED: u8 = 3;

/// Fuzzy matching found two equally close candidates for one address.
pub const EXIT_AMBIGUOUS: u8 = 4;

/// Plan or import definitions could not be parsed.
pub const EXIT_PARSE: u8 = 5;

/// File could not be read, or a script could not be written.
pub const EXIT_IO: u8 = 6;

/// Config file could not be parsed or failed validation.
pub const EXIT_CONFIG: u8 = 7;

/// Plan is well formed but not usable for this command
/// (e.g. `move` src plan creates resources, `remove` plan creates resources).
pub const EXIT_PLAN_CONTRACT: u8 = 8;

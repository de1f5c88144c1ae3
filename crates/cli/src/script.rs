// Shell script rendering for state mv / import / state rm

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use terravalet_io::ImportEntry;

use crate::config::ScriptSettings;
use crate::exit_codes::EXIT_IO;
use crate::CliError;

const SHEBANG: &str = "#! /bin/sh\n";
const DO_NOT_EDIT: &str = "# DO NOT EDIT. Generated by terravalet.\n";
const OUTPUT_FORMAT: &str = "# terravalet_output_format=2\n";

/// Single-quote `s` for POSIX sh. Embedded `'` become `'\''`.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Leave plain words alone, quote anything the shell could reinterpret.
pub fn shell_word(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:@%+=,".contains(c));
    if plain {
        s.to_string()
    } else {
        quote(s)
    }
}

/// `terraform state mv` for every `from -> to`, in key order.
///
/// `state_flags` are passed through verbatim (`-state=...` and, for moves
/// between states, `-state-out=...`).
pub fn render_mv(moves: &BTreeMap<String, String>, state_flags: &str, opts: &ScriptSettings) -> String {
    let mut out = String::new();
    out.push_str(SHEBANG);
    out.push_str(DO_NOT_EDIT);
    out.push_str(OUTPUT_FORMAT);
    out.push_str("#\n");
    let _ = write!(out, "# This script will move {} items.\n\n", moves.len());
    out.push_str("set -e\n\n");

    let lock = if opts.lock { "" } else { " -lock=false" };
    let cmd = format!("{} state mv{lock} {state_flags}", opts.terraform);
    for (from, to) in moves {
        let _ = write!(out, "{cmd} \\\n    {} \\\n    {}\n\n", quote(from), quote(to));
    }
    out
}

fn order_warning_header(out: &mut String, verb: &str, count: usize) {
    out.push_str(SHEBANG);
    out.push_str(DO_NOT_EDIT);
    out.push_str("# WARNING: check the order of resources before running this script.\n");
    out.push_str("#\n");
    let _ = write!(out, "# This script will {verb} {count} items.\n\n");
    out.push_str("# Uncomment this if you want to stop the script at first error\n");
    out.push_str("# set -e\n\n");
}

/// `terraform import` in list order.
pub fn render_import(entries: &[ImportEntry], opts: &ScriptSettings) -> String {
    let mut out = String::new();
    order_warning_header(&mut out, "import", entries.len());
    for entry in entries {
        let _ = write!(
            out,
            "{} import \\\n    {} {}\n\n",
            opts.terraform,
            quote(&entry.address),
            shell_word(&entry.id)
        );
    }
    out
}

/// `terraform state rm` in list order; undoes [`render_import`].
pub fn render_import_rollback(addresses: &[String], opts: &ScriptSettings) -> String {
    let mut out = String::new();
    order_warning_header(&mut out, "state rm", addresses.len());
    for address in addresses {
        let _ = write!(out, "{} state rm \\\n    {}\n\n", opts.terraform, quote(address));
    }
    out
}

/// `terraform state rm`, one line per address, stopping at the first error.
pub fn render_remove(addresses: &[String], opts: &ScriptSettings) -> String {
    let mut out = String::new();
    out.push_str(SHEBANG);
    out.push_str(DO_NOT_EDIT);
    let _ = write!(out, "# This script will remove {} items.\n\n", addresses.len());
    out.push_str("set -e\n\n");
    for address in addresses {
        let _ = writeln!(out, "{} state rm {}", opts.terraform, quote(address));
    }
    out.push('\n');
    out
}

/// Write every rendered script, or none.
///
/// Scripts are all rendered before this is called; a failed write removes
/// the files already written by this call.
pub fn write_scripts(scripts: &[(&Path, &str)]) -> Result<(), CliError> {
    for (i, (path, content)) in scripts.iter().enumerate() {
        if let Err(e) = std::fs::write(path, content) {
            for (written, _) in &scripts[..i] {
                let _ = std::fs::remove_file(written);
            }
            return Err(CliError {
                code: EXIT_IO,
                message: format!("writing {}: {e}", path.display()),
                hint: None,
            });
        }
        tracing::info!(path = %path.display(), bytes = content.len(), "wrote script");
    }
    Ok(())
}

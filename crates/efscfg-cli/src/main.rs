//! efscfg - EFS certificate configuration updater.
//!
//! Selects the certificate that should be the active file-encryption
//! credential and records it when the current configuration is stale.

fn main() {
    match efscfg_cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

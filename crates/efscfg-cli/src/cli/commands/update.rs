//! `efscfg update` - select and record the active EFS certificate.

use anyhow::{Context as _, Result};
use colored::Colorize;
use tracing::{info, warn};

use efscfg_core::{oids, run_selection, Outcome, SelectionCriteria};
use efscfg_store::{PersonalStore, SlotFile};

use super::Context;
use crate::cli::args::UpdateArgs;

pub fn execute(ctx: &Context, args: UpdateArgs) -> Result<i32> {
    let criteria = build_criteria(ctx, &args);

    let store_dir = args
        .store_dir
        .or_else(|| ctx.config.store_dir.clone())
        .context(
            "no certificate store directory configured.\n\n\
             Set it with one of:\n  \
             1. --store-dir <DIR>\n  \
             2. EFSCFG_STORE_DIR environment variable\n  \
             3. efscfg config set store_dir <DIR>",
        )?;

    let store = PersonalStore::open(&store_dir)
        .with_context(|| format!("couldn't open your certificate store {}", store_dir.display()))?;
    let candidates = store.candidates()?;
    info!(count = candidates.len(), "certificates to examine");

    let mut slot = match args.state_file {
        Some(path) => SlotFile::at(path),
        None => SlotFile::default_for_user()?,
    };

    let outcome = run_selection(&candidates, &criteria, &mut slot, chrono::Utc::now())
        .context("failed to update the EFS certificate configuration")?;

    match &outcome {
        Outcome::AlreadyValid => {
            println!(
                "{} The selected certificate is already configured as the active EFS certificate.",
                "OK:".green().bold()
            );
        }
        Outcome::Updated(fingerprint) => {
            println!(
                "{} EFS configuration updated to certificate {}.",
                "OK:".green().bold(),
                fingerprint.to_string().cyan()
            );
        }
        Outcome::NotFound => {
            eprintln!(
                "{} No EFS certificate suitable for updating the configuration was found. \
                 Please notify your administrator.",
                "Warning:".yellow().bold()
            );
        }
    }

    Ok(outcome.exit_code())
}

fn build_criteria(ctx: &Context, args: &UpdateArgs) -> SelectionCriteria {
    let mut criteria = SelectionCriteria::new(oids::EFS_EKU);

    criteria.template_name = args
        .template
        .clone()
        .or_else(|| ctx.config.template.clone());
    criteria.require_v2_template = args.migrate_v1;

    // Recognized but inert: kept out of the predicate chain on purpose.
    if let Some(ca) = &args.issuing_ca {
        warn!(issuing_ca = %ca, "issuing-CA filtering is not enforced yet; option ignored");
        criteria.issuing_ca = Some(ca.clone());
    }

    criteria
}

//! Render the apartment update policy from the editor allow-list and apply it
//! to the hosted database.

use apartment_tracker::config::{self, ConfigError};
use apartment_tracker::hosted::{apply_migration, HostedError};
use apartment_tracker::logging;
use apartment_tracker::policy::{render_update_policy, EditorAllowList};
use clap::Parser;
use std::io::Write;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(about = "Apply the apartments update policy to the hosted database")]
struct Args {
    /// Comma-separated emails allowed to update apartments.
    #[arg(long, env = "APARTMENT_EDITORS", default_value = "")]
    editors: String,

    /// Postgres connection string of the hosted database.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Print the rendered SQL instead of applying it.
    #[arg(long)]
    dry_run: bool,
}

fn run(args: &Args) -> Result<(), HostedError> {
    let editors = EditorAllowList::parse(&args.editors);
    if editors.is_empty() {
        warn!("editor allow-list is empty; the policy will deny every update");
    }
    let sql = render_update_policy(&editors);

    if args.dry_run {
        let mut out = std::io::stdout().lock();
        out.write_all(sql.as_bytes())
            .map_err(|e| HostedError::Request(e.to_string()))?;
        return Ok(());
    }

    let database_url = args
        .database_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::Missing("DATABASE_URL"))?;

    apply_migration(database_url, &sql)?;
    info!(editors = editors.emails().len(), "update policy applied");
    Ok(())
}

fn main() {
    config::load_dotenv();
    logging::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("could not apply policy: {e}");
        std::process::exit(1);
    }
}

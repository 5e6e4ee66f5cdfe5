//! Create an admin account on the hosted auth service.

use apartment_tracker::config::{self, HostedConfig};
use apartment_tracker::hosted::{AdminClient, HostedError};
use apartment_tracker::logging;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Create a confirmed admin user on the hosted auth service")]
struct Args {
    /// Email address of the new admin.
    #[arg(long)]
    email: String,

    /// Initial password. Prefer the environment over the command line.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

fn run(args: &Args) -> Result<(), HostedError> {
    let cfg = HostedConfig::from_env()?;
    let user = AdminClient::new(&cfg).create_user(&args.email, &args.password)?;
    info!(
        id = %user.id,
        email = user.email.as_deref().unwrap_or(&args.email),
        created_at = user.created_at.as_deref().unwrap_or("-"),
        "admin user created"
    );
    Ok(())
}

fn main() {
    config::load_dotenv();
    logging::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("could not create admin user: {e}");
        std::process::exit(1);
    }
}

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let secret = matches
        .get_one::<String>("secret")
        .cloned()
        .map(SecretString::from);

    let storage_type = matches
        .get_one::<String>("storage-type")
        .cloned()
        .context("missing argument: --storage-type")?;

    Ok(Action::Server(Args {
        port,
        secret,
        storage_type,
    }))
}

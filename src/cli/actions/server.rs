use crate::gate::{layer::GateState, AuthMode, GateConfig};
use crate::pordisto;
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub secret: Option<SecretString>,
    pub storage_type: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let mode = AuthMode::from_storage_type(&args.storage_type);

    log_startup_args(&args, mode);

    if args.secret.is_none() {
        warn!("no server secret configured, every gated request will be redirected to /warning");
    }

    let config = GateConfig::new(mode, args.secret);
    let state = Arc::new(GateState::new(config));

    pordisto::new(args.port, state).await
}

fn log_startup_args(args: &Args, mode: AuthMode) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("storage_type", args.storage_type.clone()),
        ("mode", mode.as_str().to_string()),
        ("secret_set", args.secret.is_some().to_string()),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", pordisto_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn pordisto_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    PORDISTO_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const PORDISTO_BANNER: &str = r"
  +-------+
  |  o-m  |
  |  | |  |  P O R D I S T O {VERSION}
  +--|-|--+
     | |";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_carries_version() {
        let banner = pordisto_banner();
        assert!(banner.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn short_commit_truncates_long_hashes() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("unknown"), "unknown");
        assert_eq!(short_commit(" abc "), "abc");
    }
}

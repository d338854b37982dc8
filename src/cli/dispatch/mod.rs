//! Maps parsed CLI arguments to an action with its full configuration.

use crate::cli::actions::{Action, navigate::Args};
use crate::cli::commands::{router, session};
use crate::config::AppConfig;
use anyhow::{Context, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let base_path = router::base_path(matches);

    match matches.subcommand() {
        Some(("routes", _)) => Ok(Action::Routes { base_path }),
        Some(("navigate", sub_m)) => {
            let url = sub_m
                .get_one::<String>(router::ARG_URL)
                .cloned()
                .context("missing required argument: <url>")?;
            let from = sub_m.get_one::<String>(router::ARG_FROM).cloned();

            let session_opts = session::Options::parse(matches)?;
            if session_opts.assume_session.is_none() && session_opts.auth_url.is_none() {
                anyhow::bail!(
                    "missing session source: --{} or --{}",
                    session::ARG_AUTH_URL,
                    session::ARG_ASSUME_SESSION
                );
            }

            Ok(Action::Navigate(Args {
                url,
                from,
                config: AppConfig {
                    base_path,
                    auth_url: session_opts.auth_url,
                    anon_key: session_opts.anon_key,
                    access_token: session_opts.access_token,
                    request_timeout: session_opts.timeout,
                    on_session_error: session_opts.on_session_error,
                    assume_session: session_opts.assume_session,
                },
            }))
        }
        _ => anyhow::bail!("missing subcommand"),
    }
}

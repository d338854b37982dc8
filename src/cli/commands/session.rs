use crate::{
    config::{DEFAULT_TIMEOUT_SECONDS, normalize_value, parse_auth_url},
    guard::SessionFailurePolicy,
};
use clap::{Arg, ArgMatches, Command, builder::PossibleValuesParser};
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_ANON_KEY: &str = "anon-key";
pub const ARG_ACCESS_TOKEN: &str = "access-token";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_ON_SESSION_ERROR: &str = "on-session-error";
pub const ARG_ASSUME_SESSION: &str = "assume-session";

#[derive(Debug, Clone)]
pub struct Options {
    pub auth_url: Option<Url>,
    pub anon_key: Option<SecretString>,
    pub access_token: Option<SecretString>,
    pub timeout: Duration,
    pub on_session_error: SessionFailurePolicy,
    pub assume_session: Option<bool>,
}

impl Options {
    /// Parse session arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the auth URL or failure policy is invalid.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        // clap passes empty env values through; treat them as unset
        let get_non_empty = |id: &str| {
            matches
                .get_one::<String>(id)
                .and_then(|value| normalize_value(value))
        };

        let auth_url = get_non_empty(ARG_AUTH_URL)
            .map(|value| parse_auth_url(&value))
            .transpose()
            .map_err(|err| anyhow::anyhow!("--{ARG_AUTH_URL}: {err}"))?;

        let on_session_error = match get_non_empty(ARG_ON_SESSION_ERROR) {
            Some(value) => value
                .parse::<SessionFailurePolicy>()
                .map_err(|err| anyhow::anyhow!(err))?,
            None => SessionFailurePolicy::default(),
        };

        let assume_session = get_non_empty(ARG_ASSUME_SESSION).map(|value| value == "present");

        Ok(Self {
            auth_url,
            anon_key: get_non_empty(ARG_ANON_KEY).map(SecretString::from),
            access_token: get_non_empty(ARG_ACCESS_TOKEN).map(SecretString::from),
            timeout: Duration::from_secs(
                matches
                    .get_one::<u64>(ARG_TIMEOUT)
                    .copied()
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
            on_session_error,
            assume_session,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Auth service base URL, example: https://project.supabase.co")
                .env("WAYPOINT_AUTH_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_ANON_KEY)
                .long(ARG_ANON_KEY)
                .help("Public API key sent with session queries")
                .env("WAYPOINT_ANON_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_ACCESS_TOKEN)
                .long(ARG_ACCESS_TOKEN)
                .help("Access token of the current session; without it the session is absent")
                .env("WAYPOINT_ACCESS_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Session query timeout in seconds")
                .env("WAYPOINT_TIMEOUT")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_ON_SESSION_ERROR)
                .long(ARG_ON_SESSION_ERROR)
                .help("How a failed session query is treated")
                .env("WAYPOINT_ON_SESSION_ERROR")
                .default_value(SessionFailurePolicy::SignedOut.as_str())
                .global(true)
                .value_parser(PossibleValuesParser::new(SessionFailurePolicy::VARIANTS)),
        )
        .arg(
            Arg::new(ARG_ASSUME_SESSION)
                .long(ARG_ASSUME_SESSION)
                .help("Skip the auth service and assume a session is present or absent")
                .env("WAYPOINT_ASSUME_SESSION")
                .global(true)
                .value_parser(PossibleValuesParser::new(["present", "absent"])),
        )
}

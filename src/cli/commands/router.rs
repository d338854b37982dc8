use crate::config::normalize_base_path;
use clap::{Arg, ArgMatches, Command};

pub const ARG_BASE_PATH: &str = "base-path";
pub const ARG_URL: &str = "url";
pub const ARG_FROM: &str = "from";

/// Normalized history base path.
#[must_use]
pub fn base_path(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>(ARG_BASE_PATH)
        .map(|value| normalize_base_path(value))
        .unwrap_or_default()
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_BASE_PATH)
            .long(ARG_BASE_PATH)
            .help("History base path the app is served under")
            .env("WAYPOINT_BASE_PATH")
            .default_value("/")
            .global(true),
    )
}

#[must_use]
pub fn routes_command() -> Command {
    Command::new("routes").about("Print the route table as JSON")
}

#[must_use]
pub fn navigate_command() -> Command {
    Command::new("navigate")
        .about("Run a navigation through the session guard and print the result as JSON")
        .arg(
            Arg::new(ARG_URL)
                .help("Target URL, with or without the base path")
                .required(true),
        )
        .arg(
            Arg::new(ARG_FROM)
                .long(ARG_FROM)
                .help("Location to navigate from before the target"),
        )
}

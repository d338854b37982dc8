use crate::{
    config::AppConfig,
    guard::NavigationGuard,
    navigation::{Navigation, Router},
    routes::app_routes,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub url: String,
    pub from: Option<String>,
    pub config: AppConfig,
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub href: String,
    #[serde(flatten)]
    pub navigation: Navigation,
}

/// Run the navigation described by `args` through the guard.
///
/// # Errors
/// Returns an error if the session source cannot be built or the navigation
/// fails (redirect loop, unknown redirect target).
pub async fn run(args: &Args) -> Result<Outcome> {
    let provider = args
        .config
        .session_source()
        .context("failed to configure session source")?;
    let guard = NavigationGuard::new(provider).with_failure_policy(args.config.on_session_error);
    let router = Router::new(app_routes()?, &args.config.base_path, guard);

    if let Some(from) = &args.from {
        router
            .push(from)
            .await
            .with_context(|| format!("failed to navigate to source location {from}"))?;
    }

    let navigation = router
        .push(&args.url)
        .await
        .with_context(|| format!("failed to navigate to {}", args.url))?;

    info!(
        to = %navigation.location.full_path,
        redirected = navigation.was_redirected(),
        "navigation finished"
    );

    Ok(Outcome {
        href: router.href(&navigation.location),
        navigation,
    })
}

/// Handle the navigate action
///
/// # Errors
/// Returns an error if the navigation fails or the result cannot be serialized
pub async fn handle(args: Args) -> Result<()> {
    let outcome = run(&args).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

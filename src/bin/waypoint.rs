use anyhow::Result;
use waypoint::cli::{actions, actions::Action, start};

#[tokio::main]
async fn main() -> Result<()> {
    let action = start()?;

    match action {
        Action::Routes { base_path } => actions::routes::handle(&base_path)?,
        Action::Navigate(args) => actions::navigate::handle(args).await?,
    }

    Ok(())
}

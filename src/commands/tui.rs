use clap::ArgMatches;

use crate::cli_context::CliContext;
use crate::interactive::{run_interactive_mode, InteractiveApp, RenderPipeline};
use crate::organize::OrphanPolicy;

pub async fn handle_tui(matches: Option<&ArgMatches>) -> Result<(), Box<dyn std::error::Error>> {
    let mut context = CliContext::load()?;
    let (client, connection) = context.verified_client()?;

    let orphans = match matches {
        Some(m) if m.get_flag("keep-orphans") => OrphanPolicy::Keep,
        _ => OrphanPolicy::Drop,
    };

    let pipeline = RenderPipeline::new(client, connection);
    let app = InteractiveApp::new(pipeline, context.settings().description.clone(), orphans);

    run_interactive_mode(app).await?;
    Ok(())
}

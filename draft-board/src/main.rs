// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr)
// 2. Load config
// 3. Load both ranking tables (fatal on error)
// 4. Serve the web UI until Ctrl+C

use draft_board::config;
use draft_board::players;
use draft_board::web::{self, AppState};

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Draft board starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: title={}, team={}, {} seeded picks",
        config.app.title,
        config.app.team_name,
        config.seed.picked.len()
    );

    // 3. Load ranking tables
    let tables = players::load_all(&config).context("failed to load player rankings")?;
    info!(
        "Loaded {} offense and {} defense players",
        tables.offense.len(),
        tables.defense.len()
    );
    for name in config.seed.picked.iter().chain(config.seed.my_team.iter()) {
        if !tables.is_known(name) {
            warn!("seeded player '{}' is not in either ranking table", name);
        }
    }

    // 4. Serve
    let state = AppState::new(config, tables);
    web::serve(state, shutdown_signal()).await?;

    info!("Draft board shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Initialize tracing to stderr.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("draft_board=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

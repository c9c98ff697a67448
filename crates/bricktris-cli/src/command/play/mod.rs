use std::path::PathBuf;

use bricktris_engine::{GameSession, HIGH_SCORE_FILE, PieceSeed, Snapshot};
use chrono::{DateTime, Utc};
use rand::Rng as _;
use serde::Serialize;
use tracing::info;

use crate::{high_score_file::FileHighScoreStore, logging, tui::Tui, util};

use self::app::{FPS, PlayApp};

mod app;
mod input;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// File the high score is kept in
    #[clap(long, env = "BRICKTRIS_HIGH_SCORE_FILE", default_value = HIGH_SCORE_FILE)]
    pub(crate) high_score_file: PathBuf,
    /// Seed of the piece sequence (32 hex digits), random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Write log output to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Save the final state of the game as JSON when the program exits
    #[clap(long)]
    pub(crate) save_summary: Option<PathBuf>,
}

/// Contents of the `--save-summary` file.
#[derive(Debug, Serialize)]
struct GameSummary {
    finished_at: DateTime<Utc>,
    seed: PieceSeed,
    snapshot: Snapshot,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        high_score_file,
        seed,
        log_file,
        save_summary,
    } = arg;

    logging::init(log_file.as_deref())?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let store = FileHighScoreStore::new(high_score_file);
    info!(%seed, high_score_file = %store.path().display(), "Starting bricktris");

    let mut app = PlayApp::new(GameSession::with_seed(store, seed));
    Tui::with_frame_rate(FPS).run(&mut app)?;

    let snapshot = app.into_snapshot();
    info!(score = snapshot.score, high_score = snapshot.high_score, "Exiting");
    if let Some(path) = save_summary {
        let summary = GameSummary {
            finished_at: Utc::now(),
            seed,
            snapshot,
        };
        util::save_json(&summary, path)?;
    }

    Ok(())
}

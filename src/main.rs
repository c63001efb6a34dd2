//! Terminal Teratis runner (default binary).
//!
//! Reads the optional config file and flags, sets up file logging, then runs the
//! fixed-timestep loop: render, poll input until the next tick, tick the match.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use teratis::config::ConfigFile;
use teratis::core::{GameSnapshot, GameState};
use teratis::engine::{LoopControl, MatchLoop};
use teratis::input::{map_key_event, NamePrompt, PromptEvent, SoftDropLatch};
use teratis::scores::{default_scores_path, HighScoreTable};
use teratis::term::{
    EffectLayer, FrameBuffer, GameView, ScoreLine, TerminalRenderer, ViewExtras, Viewport,
};
use teratis::types::{GameAction, TICK_MS};

const LOG_FILE_NAME: &str = "teratis.log";

#[derive(Debug, Parser)]
#[command(name = "teratis", version, about = "Timed falling-block puzzle for the terminal")]
struct Cli {
    /// TOML file with game settings (flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; defaults to the wall clock
    #[arg(long)]
    seed: Option<u32>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Round length in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Score that wins the round
    #[arg(long)]
    target_score: Option<u32>,

    /// High-score file
    #[arg(long)]
    scores: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            grid_width: self.width,
            grid_height: self.height,
            time_limit_secs: self.time_limit,
            target_score: self.target_score,
            seed: self.seed,
            scores_path: self.scores.clone(),
            ..ConfigFile::default()
        }
    }
}

/// Restore terminal state - called on panic
fn restore_terminal() {
    let mut term = TerminalRenderer::new();
    let _ = term.exit();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let settings = file.merge(cli.overrides());
    let game_config = settings.game_config()?;
    let scores_path = settings
        .scores_path
        .clone()
        .unwrap_or_else(default_scores_path);

    init_logging(&scores_path);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, ?game_config, "starting round");
    let state = GameState::new(game_config, seed)?;
    let table = HighScoreTable::load(&scores_path);

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(
        &mut term,
        MatchLoop::new(state, table),
        settings.key_release_timeout_ms,
    );

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file beside the score table, never to the terminal being drawn on.
fn init_logging(scores_path: &Path) {
    let log_dir = scores_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(log_dir).ok();

    // Without a log file, events are simply discarded.
    let Ok(log_file) = File::create(log_dir.join(LOG_FILE_NAME)) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn score_lines(table: &HighScoreTable) -> Vec<ScoreLine> {
    table
        .top(teratis::term::game_view::OVERLAY_SCORE_ROWS)
        .iter()
        .map(|e| ScoreLine {
            name: e.name.clone(),
            score: e.score,
        })
        .collect()
}

fn run(
    term: &mut TerminalRenderer,
    mut game: MatchLoop<HighScoreTable>,
    key_release_timeout_ms: Option<u32>,
) -> Result<()> {
    let view = GameView::default();
    let mut latch = match key_release_timeout_ms {
        Some(ms) => SoftDropLatch::new().with_key_release_timeout_ms(ms),
        None => SoftDropLatch::new(),
    };
    let mut prompt = NamePrompt::new();
    let mut effects = EffectLayer::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut high_scores = score_lines(game.recorder());
    let mut last_status = game.status();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        effects.absorb(game.drain_effects());
        let extras = ViewExtras {
            high_scores: &high_scores,
            name_prompt: game.awaiting_name().then(|| prompt.text()),
            effects: Some(&effects),
        };
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &extras, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if game.awaiting_name() => {
                    let submitted = match prompt.handle_key(key) {
                        PromptEvent::Pending => false,
                        PromptEvent::Submit(name) => game.submit_name(Some(&name)),
                        PromptEvent::Cancel => game.submit_name(None),
                    };
                    if submitted {
                        prompt.clear();
                        high_scores = score_lines(game.recorder());
                    }
                }
                Event::Key(key) => {
                    if let Some(action) = map_key_event(key).and_then(|a| latch.observe(a)) {
                        if action == GameAction::Restart {
                            latch.reset();
                            effects.clear();
                        }
                        if game.handle_action(action) == LoopControl::Exit {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(release) = latch.update(TICK_MS) {
                game.handle_action(release);
            }
            game.tick(TICK_MS);
            effects.age();

            let status = game.status();
            if status != last_status {
                if status.is_terminal() {
                    latch.reset();
                    prompt.clear();
                    high_scores = score_lines(game.recorder());
                }
                last_status = status;
            }
        }
    }
}

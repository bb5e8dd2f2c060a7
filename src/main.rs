//! Headless kiosk runner (default binary).
//!
//! Boots the scene router and lets a simulated visitor play a few rounds on
//! the virtual clock. Useful for soak-testing a configuration file and for
//! reading the engine's logs without a renderer attached.
//!
//! Environment:
//! - `MEMORY_KIOSK_CONFIG`: path to a JSON `GameConfig` (defaults otherwise)
//! - `MEMORY_KIOSK_SEED`: deal seed, default 1
//! - `MEMORY_KIOSK_VIEWPORT`: screen size as `WxH`, default `1080x1920`
//! - `MEMORY_KIOSK_ROUNDS`: rounds to play, default 3
//! - `RUST_LOG`: log filter, default `info`

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memory_kiosk::assets;
use memory_kiosk::core::{Difficulty, GameConfig, GameRng};
use memory_kiosk::layout::Viewport;
use memory_kiosk::messages::MessageBook;
use memory_kiosk::scenes::{Input, SceneCue, SceneKind, SceneRouter};

const CONFIG_ENV_VAR: &str = "MEMORY_KIOSK_CONFIG";
const SEED_ENV_VAR: &str = "MEMORY_KIOSK_SEED";
const VIEWPORT_ENV_VAR: &str = "MEMORY_KIOSK_VIEWPORT";
const ROUNDS_ENV_VAR: &str = "MEMORY_KIOSK_ROUNDS";

/// Time the simulated visitor takes between taps.
const THINK_MS: u64 = 800;
/// Safety cap on simulated steps per round.
const MAX_STEPS_PER_ROUND: usize = 10_000;

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    let seed = env_or(SEED_ENV_VAR, 1_u64)?;
    let rounds = env_or(ROUNDS_ENV_VAR, 3_usize)?;
    let viewport = match std::env::var(VIEWPORT_ENV_VAR) {
        Ok(raw) => parse_viewport(&raw)?,
        Err(_) => Viewport::new(1080, 1920),
    };
    let messages = load_messages();

    let mut router = SceneRouter::boot(config, viewport, messages, seed, 0)
        .context("failed to boot kiosk")?;
    let mut visitor = GameRng::new(seed).for_context("visitor");

    run(&mut router, &mut visitor, rounds)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

fn run(router: &mut SceneRouter, visitor: &mut GameRng, rounds: usize) -> Result<()> {
    let mut now = 0;
    let mut played = 0;
    let mut steps = 0;

    while played < rounds {
        steps += 1;
        if steps > MAX_STEPS_PER_ROUND * rounds.max(1) {
            bail!("visitor made no progress after {steps} steps");
        }

        now += THINK_MS;
        router.advance(now)?;
        played += log_cues(router)?;
        if played >= rounds {
            break;
        }

        let input = match router.scene_kind() {
            SceneKind::DifficultySelect => {
                let difficulty = if played % 2 == 0 { Difficulty::Easy } else { Difficulty::Hard };
                Input::Choose(difficulty)
            }
            SceneKind::Lobby | SceneKind::Winner | SceneKind::PlayAgain => Input::TapEmpty,
            SceneKind::Play => match pick_card(router, visitor) {
                Some(input) => input,
                None => {
                    if let Some(deadline) = router.next_deadline() {
                        now = now.max(deadline);
                    }
                    router.advance(now)?;
                    played += log_cues(router)?;
                    continue;
                }
            },
        };

        router.handle_input(input, now)?;
        played += log_cues(router)?;
    }

    info!(played, now, "visitor left");
    Ok(())
}

/// A random face-down card, as a visitor with no memory would tap.
fn pick_card(router: &SceneRouter, visitor: &mut GameRng) -> Option<Input> {
    let session = router.session()?;
    let selectable: Vec<_> = session.registry().selectable().collect();
    visitor.choose(&selectable).copied().map(Input::TapCard)
}

/// Log drained cues; returns how many rounds ended.
fn log_cues(router: &mut SceneRouter) -> Result<usize> {
    let mut ended = 0;
    for cue in router.drain_cues() {
        tracing::debug!(target: "kiosk", ?cue, "cue");
        if let SceneCue::Entered(kind @ (SceneKind::Winner | SceneKind::PlayAgain)) = cue {
            ended += 1;
            info!(scene = %kind, difficulty = %router.difficulty(), "round ended");
        }
        if let SceneCue::Message(message) = &cue {
            info!(spanish = %message.spanish, english = %message.english, "end screen message");
        }
    }

    if let Some(session) = router.session() {
        if tracing::enabled!(target: "kiosk", tracing::Level::TRACE) {
            let snapshot = serde_json::to_string(&session.snapshot())?;
            tracing::trace!(target: "kiosk", %snapshot, "session");
        }
    }
    Ok(ended)
}

fn load_config() -> Result<GameConfig> {
    let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let config = GameConfig::from_json(&text).with_context(|| format!("invalid config in {path}"))?;
    info!(%path, "config loaded");
    Ok(config)
}

fn load_messages() -> MessageBook {
    match std::fs::read_to_string(assets::MESSAGES) {
        Ok(text) => MessageBook::parse(&text),
        Err(err) => {
            tracing::warn!(path = assets::MESSAGES, error = %err, "no end-screen messages");
            MessageBook::default()
        }
    }
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} is not a valid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_viewport(raw: &str) -> Result<Viewport> {
    let (width, height) = raw
        .trim()
        .split_once(|c: char| c == 'x' || c == 'X')
        .with_context(|| format!("viewport must look like 1080x1920, got {raw:?}"))?;
    let width: u32 = width.parse().context("bad viewport width")?;
    let height: u32 = height.parse().context("bad viewport height")?;
    if width == 0 || height == 0 {
        bail!("viewport must not be empty: {raw}");
    }
    Ok(Viewport::new(width, height))
}

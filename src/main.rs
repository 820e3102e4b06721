//! Flappy Gopher entry point
//!
//! A windowed backend is supplied by the platform layer of the host
//! application. Natively this binary runs the game on the headless platform
//! in demo mode and logs the outcome.

use anyhow::{Context, Result};

use flappy_gopher::platform::HeadlessPlatform;
use flappy_gopher::{Game, Settings};

/// One minute of demo play at the default tick rate
const DEMO_FRAMES: u64 = 60 * 60;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Flappy Gopher (headless demo) starting...");

    let settings = Settings::load();
    let mut platform = HeadlessPlatform::new()
        .with_max_frames(DEMO_FRAMES)
        .paced();

    let mut game = Game::new(&mut platform, &settings).context("failed to start the game")?;
    game.idle_mode = true;

    let frames = game.run(&mut platform);
    let best = game.state().high_score.best();
    game.shutdown(&mut platform);

    println!("Played {frames} frames, best score {best}");
    Ok(())
}

//! Game loop controller
//!
//! Owns the simulation, the loaded assets and audio, and drives one tick per
//! frame: sample input, update, schedule audio, draw.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::IVec2;
use thiserror::Error;

use crate::audio::AudioManager;
use crate::consts::WINDOW_TITLE;
use crate::platform::{Control, Platform, PlatformError, Texture, TextureId};
use crate::renderer::{self, DrawCommand, Image};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameState, Rules, Sprite, TickInput, tick};

/// Image files, relative to the working directory
pub mod paths {
    pub const BACKGROUND: &str = "assets/images/background.png";
    pub const EXPLOSION: &str = "assets/images/explosion.png";
    pub const PLAYER_UP: &str = "assets/images/gopher-up.png";
    pub const PLAYER_DOWN: &str = "assets/images/gopher-down.png";
    pub const ASTEROID: &str = "assets/images/asteroid.png";
}

/// Loaded textures
#[derive(Debug, Clone, Copy)]
pub struct Textures {
    pub background: Texture,
    pub explosion: Texture,
    pub player_up: Texture,
    pub player_down: Texture,
    pub asteroid: Texture,
}

impl Textures {
    /// Load every image. On failure the ones already loaded are released.
    pub fn load<P: Platform>(platform: &mut P) -> Result<Self, PlatformError> {
        let mut loaded = Vec::new();
        let result = Self::load_all(platform, &mut loaded);
        if result.is_err() {
            for id in loaded {
                platform.unload_texture(id);
            }
        }
        result
    }

    fn load_all<P: Platform>(
        platform: &mut P,
        loaded: &mut Vec<TextureId>,
    ) -> Result<Self, PlatformError> {
        let mut load = |path: &str| {
            let texture = platform.load_texture(path)?;
            loaded.push(texture.id);
            Ok::<_, PlatformError>(texture)
        };
        Ok(Self {
            background: load(paths::BACKGROUND)?,
            explosion: load(paths::EXPLOSION)?,
            player_up: load(paths::PLAYER_UP)?,
            player_down: load(paths::PLAYER_DOWN)?,
            asteroid: load(paths::ASTEROID)?,
        })
    }

    pub fn get(&self, image: Image) -> TextureId {
        let texture = match image {
            Image::Background => self.background,
            Image::Sprite(Sprite::Explosion) => self.explosion,
            Image::Sprite(Sprite::PlayerUp) => self.player_up,
            Image::Sprite(Sprite::PlayerDown) => self.player_down,
            Image::Sprite(Sprite::Asteroid) => self.asteroid,
        };
        texture.id
    }

    fn unload<P: Platform>(self, platform: &mut P) {
        for texture in [
            self.background,
            self.explosion,
            self.player_up,
            self.player_down,
            self.asteroid,
        ] {
            platform.unload_texture(texture.id);
        }
    }
}

fn size_of(texture: &Texture) -> IVec2 {
    IVec2::new(texture.width, texture.height)
}

/// Seed from the wall clock when settings do not pin one
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Why the game could not start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    textures: Textures,
    audio: AudioManager,
    /// Let the autopilot play
    pub idle_mode: bool,
}

impl Game {
    /// Open the window and load every asset. Invalid settings or any missing
    /// asset is fatal, and a failed start leaves the window closed.
    pub fn new<P: Platform>(platform: &mut P, settings: &Settings) -> Result<Self, StartupError> {
        settings.validate()?;

        platform.init_window(settings.screen_width, settings.screen_height, WINDOW_TITLE);
        platform.set_target_fps(settings.target_fps);

        let textures = match Textures::load(platform) {
            Ok(textures) => textures,
            Err(e) => {
                platform.close_window();
                return Err(e.into());
            }
        };
        let audio = match AudioManager::load(platform, settings) {
            Ok(audio) => audio,
            Err(e) => {
                textures.unload(platform);
                platform.close_window();
                return Err(e.into());
            }
        };

        // Entity sizes come from the sprites they start with
        let rules = Rules::new(
            settings,
            size_of(&textures.player_down),
            size_of(&textures.asteroid),
        );
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("New game, seed {}", seed);

        Ok(Self {
            state: GameState::new(rules, seed),
            textures,
            audio,
            idle_mode: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run one frame
    pub fn frame<P: Platform>(&mut self, platform: &mut P) {
        platform.begin_frame();

        let input = TickInput {
            ascend: platform.is_down(Control::Ascend),
            confirm: platform.is_pressed(Control::Confirm),
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input);

        self.audio
            .update(platform, self.state.session.screen, &self.state.events);

        let cmds = renderer::compose(&self.state, |text, size| platform.measure_text(text, size));
        self.submit(platform, cmds);

        platform.end_frame();
    }

    fn submit<P: Platform>(&self, platform: &mut P, cmds: Vec<DrawCommand>) {
        for cmd in cmds {
            match cmd {
                DrawCommand::Clear(color) => platform.clear(color),
                DrawCommand::Image { image, x, y } => {
                    platform.draw_texture(self.textures.get(image), x, y)
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    size,
                    color,
                } => platform.draw_text(&text, x, y, size, color),
            }
        }
    }

    /// Loop until the platform asks to close. Returns the frame count.
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> u64 {
        let mut frames = 0;
        while !platform.should_close() {
            self.frame(platform);
            frames += 1;
        }
        log::info!(
            "Closing after {} frames, best score {}",
            frames,
            self.state.high_score.best()
        );
        frames
    }

    /// Release every platform resource and close the window
    pub fn shutdown<P: Platform>(self, platform: &mut P) {
        self.audio.unload(platform);
        self.textures.unload(platform);
        platform.close_window();
    }
}

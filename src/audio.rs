//! Audio scheduling
//!
//! Decides each frame which music and sound commands to send to the
//! platform. Playback itself is fire-and-forget.

use crate::platform::{MusicId, Platform, PlatformError, SoundId};
use crate::settings::Settings;
use crate::sim::{GameEvent, Screen};

/// Sound file for the explosion effect
pub const EXPLODE_SOUND: &str = "assets/sounds/explode.wav";
/// Music stream looped during gameplay
pub const GAMEPLAY_MUSIC: &str = "assets/sounds/gameplay.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hit an asteroid
    Explode,
}

impl SoundEffect {
    /// The effect a simulation event triggers, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collision { .. } => Some(SoundEffect::Explode),
            _ => None,
        }
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    explode: SoundId,
    music: MusicId,
    sfx_volume: f32,
    music_volume: f32,
}

impl AudioManager {
    /// Load sounds and music. Fails if any file is missing, leaving the
    /// audio device closed and nothing loaded.
    pub fn load<P: Platform>(platform: &mut P, settings: &Settings) -> Result<Self, PlatformError> {
        platform.init_audio();
        let explode = match platform.load_sound(EXPLODE_SOUND) {
            Ok(sound) => sound,
            Err(e) => {
                platform.close_audio();
                return Err(e);
            }
        };
        let music = match platform.load_music(GAMEPLAY_MUSIC) {
            Ok(music) => music,
            Err(e) => {
                platform.unload_sound(explode);
                platform.close_audio();
                return Err(e);
            }
        };
        Ok(Self {
            explode,
            music,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        })
    }

    /// Play a sound effect
    pub fn play<P: Platform>(&self, platform: &mut P, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let sound = match effect {
            SoundEffect::Explode => self.explode,
        };
        platform.play_sound(sound, self.sfx_volume);
    }

    /// Per-frame update: keep gameplay music streaming while playing,
    /// stop it otherwise, and fire effects for this tick's events.
    pub fn update<P: Platform>(&self, platform: &mut P, screen: Screen, events: &[GameEvent]) {
        if screen == Screen::GamePlay {
            if !platform.is_music_playing(self.music) {
                if self.music_volume > 0.0 {
                    platform.play_music(self.music, self.music_volume);
                }
            } else {
                platform.update_music(self.music);
            }
        } else {
            platform.stop_music(self.music);
        }

        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(platform, effect);
        }
    }

    /// Stop everything and release the handles
    pub fn unload<P: Platform>(self, platform: &mut P) {
        platform.stop_all_sounds();
        platform.stop_music(self.music);
        platform.unload_sound(self.explode);
        platform.unload_music(self.music);
        platform.close_audio();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::{AudioCall, HeadlessPlatform};

    fn setup(settings: &Settings) -> (HeadlessPlatform, AudioManager) {
        let mut platform = HeadlessPlatform::new();
        let audio = AudioManager::load(&mut platform, settings).unwrap();
        (platform, audio)
    }

    #[test]
    fn test_music_starts_then_streams() {
        let (mut platform, audio) = setup(&Settings::default());

        audio.update(&mut platform, Screen::GamePlay, &[]);
        audio.update(&mut platform, Screen::GamePlay, &[]);
        audio.update(&mut platform, Screen::GameEnding, &[]);

        assert_eq!(
            platform.audio_log,
            vec![
                AudioCall::PlayMusic(audio.music),
                AudioCall::UpdateMusic(audio.music),
                AudioCall::StopMusic(audio.music),
            ]
        );
        assert!(!platform.is_music_playing(audio.music));
    }

    #[test]
    fn test_collision_plays_explosion() {
        let (mut platform, audio) = setup(&Settings::default());
        audio.update(
            &mut platform,
            Screen::GameEnding,
            &[GameEvent::Collision { index: 0 }, GameEvent::Restarted],
        );
        assert!(platform.audio_log.contains(&AudioCall::PlaySound(audio.explode)));
        assert_eq!(
            platform
                .audio_log
                .iter()
                .filter(|c| matches!(c, AudioCall::PlaySound(_)))
                .count(),
            1
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let (mut platform, audio) = setup(&settings);
        audio.update(&mut platform, Screen::GamePlay, &[GameEvent::Collision { index: 0 }]);
        assert!(platform.audio_log.is_empty());
    }

    #[test]
    fn test_missing_sound_fails_load() {
        let mut platform = HeadlessPlatform::new().with_missing(EXPLODE_SOUND);
        let err = AudioManager::load(&mut platform, &Settings::default()).unwrap_err();
        assert_eq!(err, PlatformError::Audio(EXPLODE_SOUND.to_string()));
        assert!(!platform.audio_open);
    }

    #[test]
    fn test_missing_music_releases_sound() {
        let mut platform = HeadlessPlatform::new().with_missing(GAMEPLAY_MUSIC);
        let err = AudioManager::load(&mut platform, &Settings::default()).unwrap_err();
        assert_eq!(err, PlatformError::Audio(GAMEPLAY_MUSIC.to_string()));
        assert!(platform.loaded_sounds.is_empty());
        assert!(!platform.audio_open);
    }

    #[test]
    fn test_unload_releases_handles() {
        let (mut platform, audio) = setup(&Settings::default());
        audio.unload(&mut platform);
        assert!(platform.loaded_sounds.is_empty());
        assert!(platform.loaded_music.is_empty());
        assert!(!platform.audio_open);
    }
}

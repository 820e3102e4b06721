//! Platform abstraction layer
//!
//! The presentation collaborator the game loop talks to:
//! - Window lifecycle and frame pacing
//! - Input (held / newly pressed per control)
//! - Drawing primitives and text measurement
//! - Sound and music playback
//! - Texture loading

pub mod headless;

pub use headless::HeadlessPlatform;
use thiserror::Error;

use crate::renderer::colors::Color;

/// Logical controls the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Hold to fly up (Space)
    Ascend,
    /// Start / restart (Enter)
    Confirm,
    /// Close the game (Esc); handled by the platform itself
    Quit,
}

/// Opaque handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Opaque handle to a loaded one-shot sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub u32);

/// Opaque handle to a loaded music stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicId(pub u32);

/// A loaded texture and its pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: i32,
    pub height: i32,
}

/// Resource acquisition failures. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// Image file missing or undecodable
    #[error("failed to load texture '{0}'")]
    Texture(String),
    /// Sound or music file missing or undecodable
    #[error("failed to load audio '{0}'")]
    Audio(String),
}

/// Window, input, drawing, audio and asset services
pub trait Platform {
    // === Window ===
    fn init_window(&mut self, width: i32, height: i32, title: &str);
    fn set_target_fps(&mut self, fps: u32);
    /// Close requested (window close button or the quit control)
    fn should_close(&mut self) -> bool;
    fn close_window(&mut self);
    fn begin_frame(&mut self);
    /// Present the frame and block until the frame budget elapses
    fn end_frame(&mut self);

    // === Input ===
    fn is_down(&self, control: Control) -> bool;
    fn is_pressed(&self, control: Control) -> bool;

    // === Drawing ===
    fn clear(&mut self, color: Color);
    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Color);
    /// Pixel width of `text` at `size` (widest line for multi-line text)
    fn measure_text(&self, text: &str, size: i32) -> i32;

    // === Assets ===
    fn load_texture(&mut self, path: &str) -> Result<Texture, PlatformError>;
    fn unload_texture(&mut self, texture: TextureId);

    // === Audio ===
    fn init_audio(&mut self);
    fn close_audio(&mut self);
    fn load_sound(&mut self, path: &str) -> Result<SoundId, PlatformError>;
    fn unload_sound(&mut self, sound: SoundId);
    /// Fire-and-forget; overlapping plays are allowed
    fn play_sound(&mut self, sound: SoundId, volume: f32);
    fn stop_all_sounds(&mut self);
    fn load_music(&mut self, path: &str) -> Result<MusicId, PlatformError>;
    fn unload_music(&mut self, music: MusicId);
    fn play_music(&mut self, music: MusicId, volume: f32);
    /// Feed the stream; call every frame while playing
    fn update_music(&mut self, music: MusicId);
    fn stop_music(&mut self, music: MusicId);
    fn is_music_playing(&self, music: MusicId) -> bool;
}

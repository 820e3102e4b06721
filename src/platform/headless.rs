//! In-memory platform
//!
//! No window, no audio device. Input comes from a script, textures have
//! configurable fixed sizes, and every draw/audio call is recorded. Backs the
//! native demo binary and the controller tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::thread;
use std::time::{Duration, Instant};

use super::{Control, MusicId, Platform, PlatformError, SoundId, Texture, TextureId};
use crate::renderer::colors::Color;

/// Controls for one scripted frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedFrame {
    pub held: Vec<Control>,
    pub pressed: Vec<Control>,
}

impl ScriptedFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn hold(control: Control) -> Self {
        Self {
            held: vec![control],
            pressed: Vec::new(),
        }
    }

    pub fn press(control: Control) -> Self {
        Self {
            held: vec![control],
            pressed: vec![control],
        }
    }
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Texture { texture: TextureId, x: i32, y: i32 },
    Text { text: String, x: i32, y: i32, size: i32, color: Color },
}

/// A recorded audio call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCall {
    PlaySound(SoundId),
    StopAllSounds,
    PlayMusic(MusicId),
    UpdateMusic(MusicId),
    StopMusic(MusicId),
}

/// Platform that runs without any devices
#[derive(Debug)]
pub struct HeadlessPlatform {
    /// Remaining scripted input, consumed one entry per frame
    script: VecDeque<ScriptedFrame>,
    current: ScriptedFrame,
    /// Close after this many frames
    max_frames: Option<u64>,
    /// Sleep in `end_frame` to honour the target fps
    paced: bool,

    pub title: String,
    pub window_size: (i32, i32),
    pub window_open: bool,
    pub audio_open: bool,
    pub target_fps: u32,
    pub frames: u64,
    frame_started: Option<Instant>,

    /// Pixel size reported for textures, by path
    texture_sizes: HashMap<String, (i32, i32)>,
    default_texture_size: (i32, i32),
    /// Paths that fail to load
    missing: HashSet<String>,
    next_handle: u32,
    pub loaded_textures: HashSet<TextureId>,
    pub loaded_sounds: HashSet<SoundId>,
    pub loaded_music: HashSet<MusicId>,
    playing_music: HashSet<MusicId>,

    /// Draw calls of the most recent frame
    pub draws: Vec<DrawCall>,
    /// All audio calls since startup
    pub audio_log: Vec<AudioCall>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            current: ScriptedFrame::default(),
            max_frames: None,
            paced: false,
            title: String::new(),
            window_size: (0, 0),
            window_open: false,
            audio_open: false,
            target_fps: 0,
            frames: 0,
            frame_started: None,
            texture_sizes: HashMap::new(),
            default_texture_size: (32, 32),
            missing: HashSet::new(),
            next_handle: 1,
            loaded_textures: HashSet::new(),
            loaded_sounds: HashSet::new(),
            loaded_music: HashSet::new(),
            playing_music: HashSet::new(),
            draws: Vec::new(),
            audio_log: Vec::new(),
        }
    }

    /// Queue scripted frames; once exhausted, frames have no input
    pub fn with_script(mut self, frames: impl IntoIterator<Item = ScriptedFrame>) -> Self {
        self.script.extend(frames);
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn with_texture_size(mut self, path: &str, width: i32, height: i32) -> Self {
        self.texture_sizes.insert(path.to_string(), (width, height));
        self
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    /// Sleep to the target frame rate instead of running flat out
    pub fn paced(mut self) -> Self {
        self.paced = true;
        self
    }

    /// Append one frame of input to the script while running
    pub fn push_frame(&mut self, frame: ScriptedFrame) {
        self.script.push_back(frame);
    }

    /// Text of every text draw call in the last frame
    pub fn texts(&self) -> Vec<&str> {
        self.draws
            .iter()
            .filter_map(|d| match d {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_handle;
        self.next_handle += 1;
        id
    }

    fn check(&self, path: &str) -> bool {
        !self.missing.contains(path)
    }
}

impl Platform for HeadlessPlatform {
    fn init_window(&mut self, width: i32, height: i32, title: &str) {
        self.window_size = (width, height);
        self.title = title.to_string();
        self.window_open = true;
        log::info!("Headless window '{}' {}x{}", title, width, height);
    }

    fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps;
    }

    fn should_close(&mut self) -> bool {
        if !self.window_open {
            return true;
        }
        if self.current.pressed.contains(&Control::Quit) {
            return true;
        }
        self.max_frames.is_some_and(|max| self.frames >= max)
    }

    fn close_window(&mut self) {
        self.window_open = false;
    }

    fn begin_frame(&mut self) {
        self.current = self.script.pop_front().unwrap_or_default();
        self.draws.clear();
        self.frame_started = Some(Instant::now());
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        if !self.paced || self.target_fps == 0 {
            return;
        }
        let budget = Duration::from_secs_f64(1.0 / self.target_fps as f64);
        if let Some(started) = self.frame_started.take() {
            let elapsed = started.elapsed();
            if elapsed < budget {
                thread::sleep(budget - elapsed);
            }
        }
    }

    fn is_down(&self, control: Control) -> bool {
        self.current.held.contains(&control)
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.current.pressed.contains(&control)
    }

    fn clear(&mut self, color: Color) {
        self.draws.push(DrawCall::Clear(color));
    }

    fn draw_texture(&mut self, texture: TextureId, x: i32, y: i32) {
        self.draws.push(DrawCall::Texture { texture, x, y });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: i32, color: Color) {
        self.draws.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }

    /// Fixed-advance font: every glyph is half the font size wide
    fn measure_text(&self, text: &str, size: i32) -> i32 {
        let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        widest as i32 * size / 2
    }

    fn load_texture(&mut self, path: &str) -> Result<Texture, PlatformError> {
        if !self.check(path) {
            return Err(PlatformError::Texture(path.to_string()));
        }
        let (width, height) = self
            .texture_sizes
            .get(path)
            .copied()
            .unwrap_or(self.default_texture_size);
        let id = TextureId(self.next_id());
        self.loaded_textures.insert(id);
        Ok(Texture { id, width, height })
    }

    fn unload_texture(&mut self, texture: TextureId) {
        self.loaded_textures.remove(&texture);
    }

    fn init_audio(&mut self) {
        self.audio_open = true;
    }

    fn close_audio(&mut self) {
        self.audio_open = false;
    }

    fn load_sound(&mut self, path: &str) -> Result<SoundId, PlatformError> {
        if !self.check(path) {
            return Err(PlatformError::Audio(path.to_string()));
        }
        let id = SoundId(self.next_id());
        self.loaded_sounds.insert(id);
        Ok(id)
    }

    fn unload_sound(&mut self, sound: SoundId) {
        self.loaded_sounds.remove(&sound);
    }

    fn play_sound(&mut self, sound: SoundId, _volume: f32) {
        self.audio_log.push(AudioCall::PlaySound(sound));
    }

    fn stop_all_sounds(&mut self) {
        self.audio_log.push(AudioCall::StopAllSounds);
    }

    fn load_music(&mut self, path: &str) -> Result<MusicId, PlatformError> {
        if !self.check(path) {
            return Err(PlatformError::Audio(path.to_string()));
        }
        let id = MusicId(self.next_id());
        self.loaded_music.insert(id);
        Ok(id)
    }

    fn unload_music(&mut self, music: MusicId) {
        self.playing_music.remove(&music);
        self.loaded_music.remove(&music);
    }

    fn play_music(&mut self, music: MusicId, _volume: f32) {
        self.playing_music.insert(music);
        self.audio_log.push(AudioCall::PlayMusic(music));
    }

    fn update_music(&mut self, music: MusicId) {
        self.audio_log.push(AudioCall::UpdateMusic(music));
    }

    fn stop_music(&mut self, music: MusicId) {
        self.playing_music.remove(&music);
        self.audio_log.push(AudioCall::StopMusic(music));
    }

    fn is_music_playing(&self, music: MusicId) -> bool {
        self.playing_music.contains(&music)
    }
}

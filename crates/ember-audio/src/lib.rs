//! Ember Audio - Sound effect and music playback
//!
//! Wraps Kira's AudioManager with a sound cache, separate effect and
//! music volumes, and a single looping music slot. Degrades gracefully
//! when no audio device is available: every call becomes a no-op.

use ember_core::{EmberError, Result};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, DefaultBackend, Tween};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Sound playback with cached sources and one music slot
///
/// Effects are fire-and-forget; music loops until replaced or stopped.
/// Starting a new track replaces whatever is playing.
pub struct AudioPlayer {
    manager: Option<AudioManager<DefaultBackend>>,
    sound_cache: HashMap<String, StaticSoundData>,
    music: Option<StaticSoundHandle>,
    effect_volume: f64,
    music_volume: f64,
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer {
    pub fn new() -> Self {
        // Try to create the audio manager; gracefully fail if no device
        let manager = AudioManager::<DefaultBackend>::new(kira::AudioManagerSettings::default())
            .map_err(|e| log::warn!("no audio device available ({e}), running silent"))
            .ok();

        Self {
            manager,
            sound_cache: HashMap::new(),
            music: None,
            effect_volume: 1.0,
            music_volume: 1.0,
        }
    }

    /// Whether audio is actually available
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    /// Load a sound file into the cache
    pub fn load_sound(&mut self, name: &str, path: &Path) -> Result<()> {
        if self.sound_cache.contains_key(name) {
            return Ok(());
        }

        let sound_data = StaticSoundData::from_file(path).map_err(|e| {
            EmberError::AudioError(format!("failed to load '{}': {}", path.display(), e))
        })?;

        self.sound_cache.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Check if a sound is already loaded
    pub fn has_sound(&self, name: &str) -> bool {
        self.sound_cache.contains_key(name)
    }

    pub fn effect_volume(&self) -> f64 {
        self.effect_volume
    }

    pub fn set_effect_volume(&mut self, volume: f64) {
        self.effect_volume = volume.clamp(0.0, 1.0);
    }

    pub fn music_volume(&self) -> f64 {
        self.music_volume
    }

    /// Also retunes the track currently playing
    pub fn set_music_volume(&mut self, volume: f64) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if let Some(music) = &mut self.music {
            music.set_volume(
                amplitude_to_db(self.music_volume),
                Tween {
                    duration: Duration::ZERO,
                    ..Default::default()
                },
            );
        }
    }

    /// Play a cached sound once at the effect volume
    pub fn play_effect(&mut self, name: &str) -> Result<()> {
        let Some(manager) = &mut self.manager else {
            return Ok(());
        };
        let sound_data = self
            .sound_cache
            .get(name)
            .ok_or_else(|| EmberError::AudioError(format!("sound not cached: {name}")))?
            .clone();

        manager
            .play(sound_data.volume(amplitude_to_db(self.effect_volume)))
            .map_err(|e| EmberError::AudioError(format!("failed to play '{name}': {e}")))?;
        Ok(())
    }

    /// Loop a cached sound as music, replacing the current track
    pub fn play_music(&mut self, name: &str) -> Result<()> {
        if self.manager.is_none() {
            return Ok(());
        }
        let sound_data = self
            .sound_cache
            .get(name)
            .ok_or_else(|| EmberError::AudioError(format!("sound not cached: {name}")))?
            .clone();

        self.stop_music();
        let Some(manager) = &mut self.manager else {
            return Ok(());
        };
        let handle = manager
            .play(
                sound_data
                    .volume(amplitude_to_db(self.music_volume))
                    .loop_region(..),
            )
            .map_err(|e| EmberError::AudioError(format!("failed to play '{name}': {e}")))?;
        self.music = Some(handle);
        Ok(())
    }

    pub fn stop_music(&mut self) {
        if let Some(mut music) = self.music.take() {
            music.stop(Tween {
                duration: Duration::ZERO,
                ..Default::default()
            });
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_some()
    }
}

/// Convert linear amplitude (0.0-1.0) to decibels
fn amplitude_to_db(amplitude: f64) -> kira::Decibels {
    if amplitude <= 0.0 {
        kira::Decibels(-60.0) // silence
    } else {
        kira::Decibels((20.0 * (amplitude as f32).log10()).max(-60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_clamp_to_unit_range() {
        let mut audio = AudioPlayer::new();
        audio.set_effect_volume(1.5);
        assert_eq!(audio.effect_volume(), 1.0);
        audio.set_effect_volume(-0.2);
        assert_eq!(audio.effect_volume(), 0.0);
        audio.set_music_volume(0.3);
        assert_eq!(audio.music_volume(), 0.3);
    }

    #[test]
    fn test_amplitude_conversion() {
        assert_eq!(amplitude_to_db(1.0).0, 0.0);
        assert_eq!(amplitude_to_db(0.0).0, -60.0);
        assert!(amplitude_to_db(0.5).0 < 0.0);
    }

    #[test]
    fn test_playing_uncached_effect_errors_when_device_present() {
        let mut audio = AudioPlayer::new();
        if audio.is_available() {
            assert!(audio.play_effect("missing").is_err());
        } else {
            // Without a device every call is a silent no-op
            assert!(audio.play_effect("missing").is_ok());
        }
    }
}

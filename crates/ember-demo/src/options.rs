//! Persistent game settings in a flat `key: value` text file

use ember_core::Result;
use glam::Vec2;
use std::fmt::Write as _;
use std::path::Path;

/// User-facing settings saved between runs
///
/// Unrecognized lines in the file are ignored; missing keys keep their
/// defaults, so files written by older builds still load.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub window_dimensions: Vec2,
    pub fullscreen: bool,
    pub effect_volume: f32,
    pub music_volume: f32,
    pub username: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_dimensions: Vec2::new(960.0, 540.0),
            fullscreen: false,
            effect_volume: 1.0,
            music_volume: 1.0,
            username: String::new(),
        }
    }
}

impl Options {
    /// Read options from `path`, falling back to defaults when the file
    /// is absent or a value fails to parse
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("failed to open {}: {e}", path.display());
                return Self::default();
            }
        };
        let mut options = Self::default();
        for line in contents.lines() {
            if let Some(value) = line.strip_prefix("window-dimensions: ") {
                if let Some(dimensions) = parse_dimensions(value) {
                    log::info!("read window dimensions: \"{value}\"");
                    options.window_dimensions = dimensions;
                }
            } else if let Some(value) = line.strip_prefix("fullscreen: ") {
                log::info!("read fullscreen mode: \"{value}\"");
                options.fullscreen = value.trim() != "0";
            } else if let Some(value) = line.strip_prefix("effect-volume: ") {
                if let Ok(volume) = value.trim().parse() {
                    log::info!("read effect volume: \"{value}\"");
                    options.effect_volume = volume;
                }
            } else if let Some(value) = line.strip_prefix("music-volume: ") {
                if let Ok(volume) = value.trim().parse() {
                    log::info!("read music volume: \"{value}\"");
                    options.music_volume = volume;
                }
            } else if let Some(value) = line.strip_prefix("username: ") {
                log::info!("read username: \"{value}\"");
                options.username = value.to_owned();
            }
        }
        options
    }

    /// Write all options to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut contents = String::new();
        let _ = writeln!(
            contents,
            "window-dimensions: {}x{}",
            self.window_dimensions.x as u32, self.window_dimensions.y as u32
        );
        let _ = writeln!(contents, "fullscreen: {}", u32::from(self.fullscreen));
        let _ = writeln!(contents, "effect-volume: {}", self.effect_volume);
        let _ = writeln!(contents, "music-volume: {}", self.music_volume);
        let _ = write!(contents, "username: {}", self.username);
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Parse a `WxH` pair; returns None when the `x` separator is missing
pub(crate) fn parse_dimensions(value: &str) -> Option<Vec2> {
    let (width, height) = value.split_once('x')?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    Some(Vec2::new(width as f32, height as f32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("ember-demo-{name}-{}.txt", std::process::id()))
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let options = Options::load(Path::new("no-such-options-file.txt"));
        assert_eq!(options, Options::default());
        assert_eq!(options.window_dimensions, Vec2::new(960.0, 540.0));
    }

    #[test]
    fn test_save_load_round_trip() {
        let path = temp_path("round-trip");
        let options = Options {
            window_dimensions: Vec2::new(1280.0, 720.0),
            fullscreen: true,
            effect_volume: 0.5,
            music_volume: 0.25,
            username: "keegan".to_owned(),
        };
        options.save(&path).unwrap();
        let loaded = Options::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let path = temp_path("unknown-keys");
        std::fs::write(
            &path,
            "window-dimensions: 1920x1080\nvsync: 1\nusername: ada",
        )
        .unwrap();
        let loaded = Options::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.window_dimensions, Vec2::new(1920.0, 1080.0));
        assert_eq!(loaded.username, "ada");
        assert_eq!(loaded.effect_volume, 1.0);
        assert!(!loaded.fullscreen);
    }

    #[test]
    fn test_malformed_dimensions_keep_default() {
        let path = temp_path("bad-dims");
        std::fs::write(&path, "window-dimensions: 1920\nfullscreen: 1").unwrap();
        let loaded = Options::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.window_dimensions, Vec2::new(960.0, 540.0));
        assert!(loaded.fullscreen);
    }
}

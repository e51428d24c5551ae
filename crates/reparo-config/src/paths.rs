//! Preset locations.
//!
//! User presets live in `<config dir>/reparo/presets/`:
//!
//! - Linux: `~/.config/reparo/presets/`
//! - macOS: `~/Library/Application Support/reparo/presets/`
//! - Windows: `%APPDATA%\reparo\presets\`

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_presets::get_factory_preset;
use crate::preset::Preset;

const APP_NAME: &str = "reparo";
const PRESETS_SUBDIR: &str = "presets";

/// User preset directory. Falls back to `./reparo/presets` when the platform
/// has no config directory.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Create the user preset directory if missing and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Locate a preset file.
///
/// `name` may be a path to an existing file, or a preset name (with or
/// without `.toml`) looked up in the user preset directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    find_preset_in(&user_presets_dir(), name)
}

fn find_preset_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Resolve a preset by factory name, file path or user preset name, in
/// that order.
///
/// # Errors
///
/// [`ConfigError::PresetNotFound`] when nothing matches, or the load error of
/// the file that was found.
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name) {
        tracing::debug!(name, "using factory preset");
        return Ok(preset);
    }

    let path = find_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))?;
    Preset::load(path)
}

/// Preset files in the user preset directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// `.toml` files directly inside `dir`, sorted by path. Missing or unreadable
/// directories yield an empty list.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use reparo_config::preset_name_from_path;
///
/// assert_eq!(preset_name_from_path("/tmp/tape_hiss.toml").as_deref(), Some("tape_hiss"));
/// ```
pub fn preset_name_from_path(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_presets_dir_layout() {
        let dir = user_presets_dir();
        assert!(dir.ends_with("reparo/presets"));
    }

    #[test]
    fn test_list_presets_in_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.toml"), "name = \"B\"").unwrap();
        std::fs::write(tmp.path().join("a.toml"), "name = \"A\"").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let found = list_presets_in_dir(tmp.path());
        let names: Vec<_> = found.iter().filter_map(preset_name_from_path).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_list_missing_dir() {
        assert!(list_presets_in_dir(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn test_find_preset_in() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("room.toml"), "name = \"Room\"").unwrap();

        assert!(find_preset_in(tmp.path(), "room").is_some());
        assert!(find_preset_in(tmp.path(), "room.toml").is_some());
        assert!(find_preset_in(tmp.path(), "hall").is_none());
    }

    #[test]
    fn test_load_preset_factory_and_file() {
        assert_eq!(load_preset("master").unwrap().name, "Master");

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mine.toml");
        Preset::new("Mine").save(&path).unwrap();
        let loaded = load_preset(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.name, "Mine");

        assert!(matches!(
            load_preset("no_such_preset_anywhere"),
            Err(ConfigError::PresetNotFound(_))
        ));
    }
}

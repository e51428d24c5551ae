//! Repair presets embedded in the library.

use crate::Preset;

/// Identifiers of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "voice_cleanup",
    "hum_50hz",
    "hum_60hz",
    "declick",
    "podcast",
    "master",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("voice_cleanup", VOICE_CLEANUP_PRESET),
    ("hum_50hz", HUM_50HZ_PRESET),
    ("hum_60hz", HUM_60HZ_PRESET),
    ("declick", DECLICK_PRESET),
    ("podcast", PODCAST_PRESET),
    ("master", MASTER_PRESET),
];

const VOICE_CLEANUP_PRESET: &str = r#"
name = "Voice Cleanup"
description = "Gate, declick, hum removal, gentle compression"

[[steps]]
type = "gate"
[steps.params]
threshold = "-45dB"
release = "150ms"

[[steps]]
type = "declick"

[[steps]]
type = "dehum"
[steps.params]
frequency = "60Hz"

[[steps]]
type = "compress"
[steps.params]
threshold = "-18dB"
ratio = "3"

[[steps]]
type = "normalize"
[steps.params]
target = "-3dB"
"#;

const HUM_50HZ_PRESET: &str = r#"
name = "Hum 50 Hz"
description = "Notch out 50 Hz mains hum"

[[steps]]
type = "dehum"
[steps.params]
frequency = "50Hz"
bandwidth = "10Hz"
"#;

const HUM_60HZ_PRESET: &str = r#"
name = "Hum 60 Hz"
description = "Notch out 60 Hz mains hum"

[[steps]]
type = "dehum"
[steps.params]
frequency = "60Hz"
bandwidth = "10Hz"
"#;

const DECLICK_PRESET: &str = r#"
name = "Declick"
description = "Remove clicks and pops from vinyl or digital glitches"

[[steps]]
type = "declick"
[steps.params]
threshold = "0.3"
window = "5"
"#;

const PODCAST_PRESET: &str = r#"
name = "Podcast"
description = "Speech leveling with hum removal and short fades"

[[steps]]
type = "gate"
[steps.params]
threshold = "-50dB"
release = "250ms"

[[steps]]
type = "dehum"
bypassed = true
[steps.params]
frequency = "50Hz"

[[steps]]
type = "compress"
[steps.params]
threshold = "-24dB"
ratio = "4"
attack = "10ms"
release = "200ms"
makeup = "6dB"

[[steps]]
type = "normalize"
[steps.params]
target = "-1dB"

[[steps]]
type = "fade"
[steps.params]
in = "20ms"
out = "50ms"
"#;

const MASTER_PRESET: &str = r#"
name = "Master"
description = "Light compression and peak normalization"

[[steps]]
type = "compress"
[steps.params]
threshold = "-12dB"
ratio = "2"
knee = "6dB"

[[steps]]
type = "normalize"
[steps.params]
target = "-1dB"
"#;

/// All factory presets.
///
/// ```rust
/// use reparo_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Factory preset by identifier or display name, ignoring case.
///
/// ```rust
/// use reparo_config::get_factory_preset;
///
/// assert!(get_factory_preset("hum_50hz").is_some());
/// assert!(get_factory_preset("Voice Cleanup").is_some());
/// assert!(get_factory_preset("reverb").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let wanted = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML.iter().find(|(id, _)| *id == wanted) {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == wanted)
}

/// Identifiers of the factory presets.
pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

/// True when `name` resolves to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

//! Preset listing, inspection and saving.

use anyhow::Context;
use clap::Args;
use reparo_config::{
    Preset, RepairChain, ensure_user_presets_dir, factory_presets, list_user_presets, load_preset,
    parse_chain_spec, preset_name_from_path, user_presets_dir,
};

#[derive(Args)]
pub struct PresetsArgs {
    /// Preset to show (factory name, user preset name or file path).
    /// Lists all presets when omitted.
    name: Option<String>,

    /// Save a chain string as a user preset called NAME
    #[arg(long, value_name = "CHAIN", requires = "name")]
    save: Option<String>,

    /// Description stored with --save
    #[arg(short, long, requires = "save")]
    description: Option<String>,

    /// Overwrite an existing user preset when saving
    #[arg(long, requires = "save")]
    force: bool,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match (args.name.as_deref(), args.save.as_deref()) {
        (Some(name), Some(chain)) => {
            save_preset(name, chain, args.description.as_deref(), args.force)
        }
        (Some(name), None) => show_preset(name),
        (None, _) => list_presets(),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    for (id, preset) in reparo_config::FACTORY_PRESET_NAMES
        .iter()
        .zip(factory_presets())
    {
        println!(
            "  {:16} {}",
            id,
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!("\nUser Presets ({}):", user_presets_dir().display());
    let user = list_user_presets();
    if user.is_empty() {
        println!("  (none)");
    }
    for path in user {
        let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        match Preset::load(&path) {
            Ok(preset) => println!(
                "  {:16} {}",
                name,
                preset.description.as_deref().unwrap_or("")
            ),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable preset");
                println!("  {name:16} (unreadable)");
            }
        }
    }
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Name:        {}", preset.name);
    if let Some(description) = &preset.description {
        println!("Description: {description}");
    }
    println!("Steps:");
    for (i, step) in preset.iter().enumerate() {
        let params = step
            .sorted_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {}. {:10} {}", i + 1, step.display_type(), params);
    }

    RepairChain::from_preset(&preset).with_context(|| format!("preset '{name}' is invalid"))?;
    Ok(())
}

fn save_preset(
    name: &str,
    chain: &str,
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let steps = parse_chain_spec(chain)?;
    RepairChain::from_steps(&steps)?;

    let path = ensure_user_presets_dir()?.join(format!("{name}.toml"));
    if path.exists() && !force {
        anyhow::bail!(
            "preset '{}' already exists at {} (use --force to overwrite)",
            name,
            path.display()
        );
    }

    let mut preset = Preset::new(name).with_steps(steps);
    if let Some(description) = description {
        preset = preset.with_description(description);
    }
    preset.save(&path)?;

    println!("Saved {}", path.display());
    Ok(())
}

use anyhow::{Context, Result};

use armature::params::PresetFile;

mod config;
mod demo;
mod engine;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let preset = match std::env::args().nth(1) {
        Some(path) => PresetFile::load(&path)
            .with_context(|| format!("Failed to load parameter preset {path}"))?,
        None => PresetFile::default(),
    };

    let config = config::DemoConfig::default();
    let mut state = demo::DemoState::new(config, preset)?;
    engine::run(&mut state)?;

    Ok(())
}

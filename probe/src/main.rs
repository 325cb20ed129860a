use std::path::PathBuf;

use clap::Parser;
use geometry::config::config_manager::Config;

use crate::{config::ProbeConfig, scene::Scene};

mod config;
mod scene;

/// Evaluate AABB queries described in a RON scene file.
#[derive(Parser, Debug)]
#[command(name = "probe", version)]
struct Args {
    /// Scene to evaluate. Defaults to the last scene that was probed.
    scene: Option<PathBuf>,

    /// Log every query outcome at info level
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_timed();
    let args = Args::parse();

    let mut probe_config = ProbeConfig::create_manager()?;
    let verbose = args.verbose || probe_config.get().verbose;

    let Some(scene_path) = args.scene.or_else(|| probe_config.get().last_scene.clone()) else {
        anyhow::bail!(
            "No scene given and no previous scene recorded in {}",
            ProbeConfig::get_path()
        );
    };

    log::info!("Probing scene {:?}", scene_path);
    let scene = Scene::load(&scene_path)?;

    for (query, outcome) in scene.evaluate_all()? {
        if verbose {
            log::info!("{:?} -> {}", query, outcome);
        } else {
            log::debug!("{:?} -> {}", query, outcome);
        }
        println!("{:?} => {}", query, outcome);
    }

    println!(
        "{} queries evaluated against {} boxes and {} planes",
        scene.queries.len(),
        scene.boxes.len(),
        scene.planes.len()
    );

    probe_config.update_and_save(|config| config.last_scene = Some(scene_path))?;
    log::debug!("Recorded last scene in {:?}", probe_config.path());

    Ok(())
}

mod scene;

use anyhow::Result;
use fixation_grasp::GraspConfig;
use log::info;

use crate::scene::Scene;

pub fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading grasp configuration from {path}");
            GraspConfig::load(&path)?
        }
        None => GraspConfig::default(),
    };

    let mut scene = Scene::new(config);
    scene.pick_up_and_throw_cup()?;
    scene.carry_crate_with_both_hands()?;
    info!("Done after {} frames", scene.frame());

    Ok(())
}

use std::path::PathBuf;

use geometry::config::config_manager::Config;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeConfig {
    pub last_scene: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

impl Config for ProbeConfig {
    fn get_path() -> &'static str {
        "probe.ron"
    }

    fn is_valid(&self) -> bool {
        match &self.last_scene {
            Some(path) if path.as_os_str().is_empty() => false,
            _ => true,
        }
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

/// A RON file on disk mirrored by an in-memory value.
pub struct ConfigManager<T> {
    path: PathBuf,
    current: T,
}

pub trait Config: Sized + Default + Clone + Serialize + for<'a> Deserialize<'a> {
    fn get_path() -> &'static str;

    fn is_valid(&self) -> bool {
        true
    }

    fn create_manager() -> anyhow::Result<ConfigManager<Self>> {
        let mut manager = ConfigManager::new(PathBuf::from(Self::get_path()));
        manager
            .load_if_exists()
            .with_context(|| format!("Failed to load config from {}", Self::get_path()))?;
        Ok(manager)
    }
}

impl<T> ConfigManager<T>
where
    T: Config,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: T::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn load_if_exists(&mut self) -> anyhow::Result<()> {
        if self.path.exists() {
            let config_data = std::fs::read_to_string(&self.path)?;

            if config_data.trim().is_empty() {
                return Ok(());
            }

            let config: T = ron::from_str(&config_data)
                .with_context(|| format!("Failed to parse config from {:?}", &self.path))?;

            if !config.is_valid() {
                warn!("Ignoring invalid config in {:?}", &self.path);
                return Ok(());
            }

            self.current = config;
        }
        Ok(())
    }

    pub fn update_and_save<F>(&mut self, update_fn: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut T),
    {
        update_fn(&mut self.current);
        self.save()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if !self.current.is_valid() {
            warn!("Attempted to write invalid config to {:?}", &self.path);
            return Ok(());
        }

        let serialized = ron::ser::to_string_pretty(&self.current, PrettyConfig::default())?;
        std::fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write config to {:?}", &self.path))?;
        Ok(())
    }
}

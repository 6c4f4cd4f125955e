use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config value behind a content provider.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    /// Missing content yields `TConfig::default()`; unreadable or invalid
    /// content is an error.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.config.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        let mut current = self.config.lock().unwrap_or_else(|p| p.into_inner());
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Difficulty, GameMode, TicTacToeSettings};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
        writes: RefCell<usize>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            *self.writes.borrow_mut() += 1;
            Ok(())
        }
    }

    fn manager_with(
        content: Option<&str>,
    ) -> ConfigManager<MemoryContentProvider, TicTacToeSettings> {
        let provider = MemoryContentProvider::default();
        *provider.content.borrow_mut() = content.map(str::to_string);
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_content_gives_default() {
        let manager = manager_with(None);
        assert_eq!(manager.get_config().unwrap(), TicTacToeSettings::default());
    }

    #[test]
    fn test_loaded_config_is_validated() {
        let manager = manager_with(Some("mode: ai\ndifficulty: hard\nsize: 1\n"));
        let error = manager.get_config().unwrap_err();
        assert!(error.starts_with("Config validation error"));
    }

    #[test]
    fn test_invalid_config_is_not_written() {
        let manager = manager_with(None);
        let settings = TicTacToeSettings {
            size: 50,
            ..TicTacToeSettings::default()
        };
        assert!(manager.set_config(&settings).is_err());
        assert_eq!(*manager.config_content_provider.writes.borrow(), 0);
    }

    #[test]
    fn test_set_config_is_cached() {
        let manager = manager_with(None);
        let settings = TicTacToeSettings {
            mode: GameMode::Ai,
            difficulty: Difficulty::Medium,
            size: 6,
        };
        manager.set_config(&settings).unwrap();
        *manager.config_content_provider.content.borrow_mut() = None;
        assert_eq!(manager.get_config().unwrap(), settings);
    }
}

//! Repository and service traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Settings, SettingsUpdate};

/// Repository trait for managing application settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings.
    fn get_settings(&self) -> Result<Settings>;

    /// Persist every setting at once.
    async fn save_settings(&self, settings: &Settings) -> Result<()>;

    /// Get a single setting value by key.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update a single setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings>;

    /// Get a single setting value by key. Returns None if not found.
    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;
}

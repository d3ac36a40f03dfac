use super::SettingsRepositoryTrait;
use crate::errors::{DatabaseError, Error, Result};
use crate::settings::{Settings, SettingsServiceTrait, SettingsUpdate};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        update.validate()?;
        let current = self.settings_repository.get_settings()?;
        let updated = update.apply_to(&current);
        if updated.base_currency != current.base_currency {
            info!(
                "Base currency changed from {} to {}",
                current.base_currency, updated.base_currency
            );
        }
        self.settings_repository.save_settings(&updated).await?;
        Ok(updated)
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        match self.settings_repository.get_setting(key) {
            Ok(value) => Ok(Some(value)),
            Err(Error::Database(DatabaseError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::app_settings::dsl::*;
use finboard_core::errors::{DatabaseError, Error, Result};
use finboard_core::settings::{Settings, SettingsRepositoryTrait};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

fn upsert(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<()> {
    diesel::replace_into(app_settings)
        .values(&AppSettingDB {
            setting_key: key.to_string(),
            setting_value: value.to_string(),
        })
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .into_core()?;

        Settings::from_pairs(all_settings.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    async fn save_settings(&self, settings: &Settings) -> Result<()> {
        let pairs = settings.to_pairs();
        self.writer
            .exec(move |conn| {
                for (key, value) in &pairs {
                    upsert(conn, key, value)?;
                }
                Ok(())
            })
            .await
    }

    fn get_setting(&self, key: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        app_settings
            .filter(setting_key.eq(key))
            .select(setting_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("Setting {}", key))))
    }

    async fn update_setting(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.writer
            .exec(move |conn| upsert(conn, &key, &value))
            .await
    }
}

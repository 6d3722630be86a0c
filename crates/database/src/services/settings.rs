use crate::{
    entities::settings,
    error::{ServiceError, ServiceResult},
    settings::{Defaults, SettingKey, env_overrides, parse_flag},
};
use chrono::Utc;
use log::{info, warn};
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, TransactionTrait,
    sea_query::OnConflict,
};
use std::{collections::HashMap, fmt::Display, str::FromStr};

/// A setting as currently in effect
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSetting {
    pub key: SettingKey,
    pub value: String,
    pub description: String,
    /// Whether the value comes from the store rather than a default
    pub stored: bool,
}

pub struct SettingsService;

impl SettingsService {
    /// The stored value of a setting, if it has one
    pub async fn get(db: &DatabaseConnection, key: SettingKey) -> Result<Option<String>, DbErr> {
        Ok(settings::Entity::find_by_id(key.as_str().to_string())
            .one(db)
            .await?
            .map(|setting| setting.value))
    }

    /// The value of a setting in effect right now: the stored value, or the
    /// default when nothing is stored
    pub async fn resolve(
        db: &DatabaseConnection,
        defaults: &Defaults,
        key: SettingKey,
    ) -> Result<String, DbErr> {
        Ok(Self::get(db, key)
            .await?
            .unwrap_or_else(|| defaults.get(key).to_string()))
    }

    /// Resolves a setting and parses it. A stored value that does not parse
    /// falls back to the default.
    pub async fn resolve_parsed<T>(
        db: &DatabaseConnection,
        defaults: &Defaults,
        key: SettingKey,
    ) -> Result<T, DbErr>
    where
        T: FromStr,
        T::Err: Display,
    {
        if let Some(stored) = Self::get(db, key).await? {
            match stored.trim().parse() {
                Ok(value) => return Ok(value),
                Err(e) => warn!("Ignoring stored {key} {stored:?}: {e}"),
            }
        }

        defaults
            .get(key)
            .trim()
            .parse()
            .map_err(|e| DbErr::Custom(format!("Invalid default for {key}: {e}")))
    }

    pub async fn resolve_flag(
        db: &DatabaseConnection,
        defaults: &Defaults,
        key: SettingKey,
    ) -> Result<bool, DbErr> {
        Ok(parse_flag(&Self::resolve(db, defaults, key).await?))
    }

    /// Stores a setting, replacing any previous value
    pub async fn set<C: ConnectionTrait>(db: &C, key: SettingKey, value: &str) -> Result<(), DbErr> {
        let setting = settings::ActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value.to_string()),
            description: Set(Some(key.description().to_string())),
            updated_at: Set(Utc::now().naive_utc()),
        };

        settings::Entity::insert(setting)
            .on_conflict(
                OnConflict::column(settings::Column::Key)
                    .update_columns([
                        settings::Column::Value,
                        settings::Column::Description,
                        settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;

        Ok(())
    }

    /// Stores a value given by an admin after checking it
    pub async fn update(db: &DatabaseConnection, key: SettingKey, value: &str) -> ServiceResult<()> {
        Self::update_many(db, [(key, value.to_string())]).await
    }

    /// Checks every value, then stores them all in one transaction. Nothing
    /// is written if any value is rejected.
    pub async fn update_many(
        db: &DatabaseConnection,
        values: impl IntoIterator<Item = (SettingKey, String)>,
    ) -> ServiceResult<()> {
        let normalized = values
            .into_iter()
            .map(|(key, value)| key.normalize(&value).map(|normalized| (key, normalized)))
            .collect::<Result<Vec<_>, String>>()
            .map_err(ServiceError::Validation)?;

        let txn = db.begin().await?;
        for (key, value) in &normalized {
            Self::set(&txn, *key, value).await?;
        }
        txn.commit().await?;

        for (key, _) in &normalized {
            info!("Setting {key} updated");
        }

        Ok(())
    }

    /// Every recognized setting with the value currently in effect
    pub async fn list(
        db: &DatabaseConnection,
        defaults: &Defaults,
    ) -> Result<Vec<ResolvedSetting>, DbErr> {
        let stored: HashMap<String, String> = settings::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|setting| (setting.key, setting.value))
            .collect();

        Ok(SettingKey::ALL
            .into_iter()
            .map(|key| {
                let value = stored.get(key.as_str());
                ResolvedSetting {
                    key,
                    value: value
                        .cloned()
                        .unwrap_or_else(|| defaults.get(key).to_string()),
                    description: key.description().to_string(),
                    stored: value.is_some(),
                }
            })
            .collect())
    }

    /// Writes every setting given in the environment to the store, so values
    /// set at deploy time win over earlier admin edits. Returns how many
    /// settings were written.
    pub async fn apply_env_overrides(db: &DatabaseConnection) -> Result<usize, DbErr> {
        let overrides = env_overrides();

        let txn = db.begin().await?;
        for (key, value) in &overrides {
            Self::set(&txn, *key, value).await?;
        }
        txn.commit().await?;

        for (key, _) in &overrides {
            info!("Setting {key} taken from {}", key.env_var());
        }

        Ok(overrides.len())
    }

    /// Checks a candidate against the current sign-up password
    pub async fn check_signup_password(
        db: &DatabaseConnection,
        defaults: &Defaults,
        candidate: &str,
    ) -> Result<bool, DbErr> {
        Ok(Self::resolve(db, defaults, SettingKey::SignupPassword).await? == candidate)
    }

    /// Checks a candidate against the current admin password
    pub async fn check_admin_password(
        db: &DatabaseConnection,
        defaults: &Defaults,
        candidate: &str,
    ) -> Result<bool, DbErr> {
        Ok(Self::resolve(db, defaults, SettingKey::AdminPassword).await? == candidate)
    }

    pub async fn reminder_days_before(
        db: &DatabaseConnection,
        defaults: &Defaults,
    ) -> Result<u32, DbErr> {
        Self::resolve_parsed(db, defaults, SettingKey::ReminderDaysBefore).await
    }
}

//! Recognized runtime settings and their defaults.
//!
//! Settings live in the `settings` table so an admin can edit them while the
//! server runs. Every lookup goes to the store, so an edit applies to the
//! next request. Defaults come from the environment, falling back to the
//! built-in values below.

use log::warn;
use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// A setting the application knows how to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    SignupPassword,
    AdminPassword,
    RegionName,
    SignupWindowDays,
    ReminderDaysBefore,
    SmtpEnabled,
    SmtpHost,
    SmtpPort,
    SmtpUsername,
    SmtpPassword,
    SmtpFromEmail,
    SmtpFromName,
}

impl SettingKey {
    pub const ALL: [Self; 12] = [
        Self::SignupPassword,
        Self::AdminPassword,
        Self::RegionName,
        Self::SignupWindowDays,
        Self::ReminderDaysBefore,
        Self::SmtpEnabled,
        Self::SmtpHost,
        Self::SmtpPort,
        Self::SmtpUsername,
        Self::SmtpPassword,
        Self::SmtpFromEmail,
        Self::SmtpFromName,
    ];

    /// Key of the row in the settings table
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SignupPassword => "signup_password",
            Self::AdminPassword => "admin_password",
            Self::RegionName => "region_name",
            Self::SignupWindowDays => "signup_window_days",
            Self::ReminderDaysBefore => "reminder_days_before",
            Self::SmtpEnabled => "smtp_enabled",
            Self::SmtpHost => "smtp_host",
            Self::SmtpPort => "smtp_port",
            Self::SmtpUsername => "smtp_username",
            Self::SmtpPassword => "smtp_password",
            Self::SmtpFromEmail => "smtp_from_email",
            Self::SmtpFromName => "smtp_from_name",
        }
    }

    /// Environment variable that overrides the setting at boot
    pub fn env_var(self) -> &'static str {
        match self {
            Self::SignupPassword => "SIGNUP_PASSWORD",
            Self::AdminPassword => "ADMIN_PASSWORD",
            Self::RegionName => "REGION_NAME",
            Self::SignupWindowDays => "SIGNUP_WINDOW_DAYS",
            Self::ReminderDaysBefore => "REMINDER_DAYS_BEFORE",
            Self::SmtpEnabled => "SMTP_ENABLED",
            Self::SmtpHost => "SMTP_HOST",
            Self::SmtpPort => "SMTP_PORT",
            Self::SmtpUsername => "SMTP_USERNAME",
            Self::SmtpPassword => "SMTP_PASSWORD",
            Self::SmtpFromEmail => "SMTP_FROM_EMAIL",
            Self::SmtpFromName => "SMTP_FROM_NAME",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SignupPassword => "Shared password required to sign up as Q",
            Self::AdminPassword => "Password for the admin API",
            Self::RegionName => "Region shown in page titles and emails",
            Self::SignupWindowDays => "How many days ahead Qs may sign up",
            Self::ReminderDaysBefore => "Days before a workout to email the Q",
            Self::SmtpEnabled => "Whether reminder emails are sent",
            Self::SmtpHost => "SMTP server hostname",
            Self::SmtpPort => "SMTP server port",
            Self::SmtpUsername => "SMTP login",
            Self::SmtpPassword => "SMTP password",
            Self::SmtpFromEmail => "From address for reminder emails",
            Self::SmtpFromName => "From name for reminder emails",
        }
    }

    /// Secrets are never echoed back by the admin API
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Self::SignupPassword | Self::AdminPassword | Self::SmtpPassword
        )
    }

    /// Checks a value an admin wants to store and puts it in canonical form
    pub fn normalize(self, value: &str) -> Result<String, String> {
        match self {
            Self::SmtpEnabled => Ok(normalize_flag(value).to_string()),
            Self::SignupWindowDays | Self::ReminderDaysBefore => value
                .trim()
                .parse::<u32>()
                .map(|n| n.to_string())
                .map_err(|_| format!("{self} must be a whole number of days")),
            Self::SmtpPort => value
                .trim()
                .parse::<u16>()
                .map(|n| n.to_string())
                .map_err(|_| format!("{self} must be a port number")),
            Self::SignupPassword | Self::AdminPassword if value.is_empty() => {
                Err(format!("{self} cannot be empty"))
            }
            Self::SignupPassword | Self::AdminPassword | Self::SmtpPassword => {
                Ok(value.to_string())
            }
            _ => Ok(value.trim().to_string()),
        }
    }

    fn builtin_default(self) -> &'static str {
        match self {
            Self::SignupPassword => "f3cherokee",
            Self::AdminPassword => "admin123",
            Self::RegionName => "F3 Cherokee",
            Self::SignupWindowDays => "90",
            Self::ReminderDaysBefore => "2",
            Self::SmtpEnabled => "0",
            Self::SmtpPort => "587",
            Self::SmtpFromName => "F3 Q-Sheet",
            Self::SmtpHost | Self::SmtpUsername | Self::SmtpPassword | Self::SmtpFromEmail => "",
        }
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown setting: {s}"))
    }
}

impl Display for SettingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Values used for settings that have no row in the store
#[derive(Debug, Clone)]
pub struct Defaults {
    values: HashMap<SettingKey, String>,
}

impl Defaults {
    /// The compiled-in defaults, ignoring the environment
    pub fn builtin() -> Self {
        let values = SettingKey::ALL
            .into_iter()
            .map(|key| (key, key.builtin_default().to_string()))
            .collect();

        Self { values }
    }

    /// The compiled-in defaults, overridden by any environment variables set
    pub fn from_env() -> Self {
        let mut defaults = Self::builtin();
        for (key, value) in env_overrides() {
            defaults.values.insert(key, value);
        }

        defaults
    }

    pub fn with(mut self, key: SettingKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: SettingKey) -> &str {
        self.values
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.builtin_default())
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Settings explicitly set in the environment (or `.env`)
pub fn env_overrides() -> Vec<(SettingKey, String)> {
    overrides_from(|name| dotenvy::var(name).ok())
}

/// Looks up every setting's variable and keeps the values that pass
/// `normalize`. Rejected values are logged and skipped.
fn overrides_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<(SettingKey, String)> {
    SettingKey::ALL
        .into_iter()
        .filter_map(|key| {
            let value = lookup(key.env_var())?;
            match key.normalize(&value) {
                Ok(normalized) => Some((key, normalized)),
                Err(e) => {
                    warn!("Ignoring {}: {e}", key.env_var());
                    None
                }
            }
        })
        .collect()
}

/// Reads a yes/no setting. Accepts `1`, `true`, `yes` and `on`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn normalize_flag(value: &str) -> &'static str {
    if parse_flag(value) { "1" } else { "0" }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::from_str(key.as_str()), Ok(key));
        }
        assert!(SettingKey::from_str("nope").is_err());
    }

    #[test]
    fn test_builtin_defaults() {
        let defaults = Defaults::builtin();
        assert_eq!(defaults.get(SettingKey::SignupPassword), "f3cherokee");
        assert_eq!(defaults.get(SettingKey::ReminderDaysBefore), "2");
        assert_eq!(defaults.get(SettingKey::SmtpHost), "");
    }

    #[test]
    fn test_with_overrides_one_key() {
        let defaults = Defaults::builtin().with(SettingKey::AdminPassword, "hunter2");
        assert_eq!(defaults.get(SettingKey::AdminPassword), "hunter2");
        assert_eq!(defaults.get(SettingKey::SignupPassword), "f3cherokee");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(SettingKey::SmtpEnabled.normalize("yes"), Ok("1".to_string()));
        assert_eq!(SettingKey::SmtpEnabled.normalize("off"), Ok("0".to_string()));
        assert_eq!(SettingKey::SmtpPort.normalize(" 465 "), Ok("465".to_string()));
        assert!(SettingKey::SmtpPort.normalize("70000").is_err());
        assert!(SettingKey::ReminderDaysBefore.normalize("-1").is_err());
        assert!(SettingKey::AdminPassword.normalize("").is_err());
        assert_eq!(
            SettingKey::SmtpPassword.normalize(" pass "),
            Ok(" pass ".to_string())
        );
        assert_eq!(
            SettingKey::RegionName.normalize(" F3 Cherokee "),
            Ok("F3 Cherokee".to_string())
        );
    }

    #[test]
    fn test_invalid_env_values_are_skipped() {
        let env: HashMap<&str, &str> = [
            ("SIGNUP_WINDOW_DAYS", "abc"),
            ("SMTP_PORT", "smtp"),
            ("SIGNUP_PASSWORD", ""),
            ("SMTP_ENABLED", "yes"),
            ("REMINDER_DAYS_BEFORE", " 3 "),
        ]
        .into_iter()
        .collect();

        let overrides = overrides_from(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(
            overrides,
            vec![
                (SettingKey::ReminderDaysBefore, "3".to_string()),
                (SettingKey::SmtpEnabled, "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}

use crate::dtos::signup::SignupResponse;
use chrono::NaiveDate;
use database::services::settings::ResolvedSetting;
use models::coverage::CoverageStats;
use serde::Serialize;
use utoipa::ToSchema;

/// Shown in place of secret values
pub const MASK: &str = "********";

#[derive(Debug, Serialize, ToSchema)]
pub struct CoverageStatsResponse {
    pub total_slots: u64,
    pub covered_slots: u64,
    pub empty_slots: u64,
    pub coverage_percent: f64,
    pub stale_signups: u64,
}

impl From<CoverageStats> for CoverageStatsResponse {
    fn from(stats: CoverageStats) -> Self {
        Self {
            total_slots: stats.total_slots,
            covered_slots: stats.covered_slots,
            empty_slots: stats.empty_slots,
            coverage_percent: stats.coverage_percent,
            stale_signups: stats.stale_signups,
        }
    }
}

/// Coverage over a window and the signups of the coming week
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stats: CoverageStatsResponse,
    pub upcoming: Vec<SignupResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingResponse {
    pub key: String,
    /// Masked for secrets that are set
    pub value: String,
    pub description: String,
    pub secret: bool,
    /// False when the value is a default
    pub stored: bool,
}

impl From<ResolvedSetting> for SettingResponse {
    fn from(setting: ResolvedSetting) -> Self {
        let secret = setting.key.is_secret();
        let value = if secret && !setting.value.is_empty() {
            MASK.to_string()
        } else {
            setting.value
        };

        Self {
            key: setting.key.to_string(),
            value,
            description: setting.description,
            secret,
            stored: setting.stored,
        }
    }
}

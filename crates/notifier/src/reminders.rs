use crate::{
    error::NotifyError,
    mailer::{Mailer, SmtpConfig, SmtpMailer},
    message::Templates,
};
use chrono::{Days, NaiveDate};
use database::{
    services::{settings::SettingsService, signup::SignupService},
    settings::Defaults,
};
use log::{info, warn};
use sea_orm::DatabaseConnection;

/// Outcome of one reminder run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderReport {
    /// Workout date the reminders were for
    pub date: NaiveDate,
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Emails every Q signed up on `date` who has not been reminded yet.
///
/// A signup is marked reminded only after the mailer accepts its message, so
/// a failed send is retried by the next run.
pub async fn send_reminders<M: Mailer>(
    db: &DatabaseConnection,
    mailer: &M,
    date: NaiveDate,
    days_before: u32,
) -> Result<ReminderReport, NotifyError> {
    let templates = Templates::new()?;
    let due = SignupService::needing_reminder(db, date).await?;
    let mut report = ReminderReport {
        date,
        attempted: due.len(),
        sent: 0,
        failed: 0,
    };

    for details in &due {
        let Some(email) = templates.reminder(details, days_before)? else {
            report.failed += 1;
            continue;
        };
        let to = email.to.clone();

        match mailer.send(email).await {
            Ok(()) => {
                SignupService::mark_reminded(db, details.signup.id).await?;
                report.sent += 1;
                info!("Reminded {} at {to}", details.signup.q_name);
            }
            Err(e) => {
                report.failed += 1;
                warn!("Reminder to {to} for signup {} failed: {e}", details.signup.id);
            }
        }
    }

    Ok(report)
}

/// Sends the reminders due `reminder_days_before` days after `today`, using
/// the SMTP settings currently stored. With SMTP off or incomplete nothing is
/// sent and every candidate counts as failed.
pub async fn run_batch(
    db: &DatabaseConnection,
    defaults: &Defaults,
    today: NaiveDate,
) -> Result<ReminderReport, NotifyError> {
    let days_before = SettingsService::reminder_days_before(db, defaults).await?;
    let date = today
        .checked_add_days(Days::new(days_before.into()))
        .ok_or(NotifyError::DateOutOfRange)?;

    let Some(config) = SmtpConfig::load(db, defaults).await? else {
        let due = SignupService::needing_reminder(db, date).await?.len();
        warn!("SMTP unavailable, {due} reminders for {date} not sent");
        return Ok(ReminderReport {
            date,
            attempted: due,
            sent: 0,
            failed: due,
        });
    };

    let mailer = SmtpMailer::new(&config)?;
    send_reminders(db, &mailer, date, days_before).await
}

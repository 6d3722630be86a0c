//! Email reminders for Qs with an upcoming workout.

pub mod error;
pub mod mailer;
pub mod message;
pub mod reminders;

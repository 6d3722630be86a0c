use crate::mailer::Email;
use database::services::signup::SignupDetails;
use serde_json::{Value, json};
use tera::{Context, Tera};

const Q_TIPS: [&str; 4] = [
    "Arrive 10 minutes early to set up",
    "Bring your energy and enthusiasm!",
    "Have a backup plan in case of weather",
    "Remember the 5 core principles of F3",
];

fn lead_time(days_before: u32) -> String {
    match days_before {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {n} days"),
    }
}

/// The reminder email bodies. HTML templates are autoescaped.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates([
            ("reminder.txt", include_str!("templates/reminder.txt")),
            ("reminder.html", include_str!("templates/reminder.html")),
        ])?;

        Ok(Self { tera })
    }

    fn render(&self, name: &str, vars: &Value) -> Result<String, tera::Error> {
        self.tera.render(name, &Context::from_serialize(vars)?)
    }

    /// Builds the reminder sent to the Q of a signup. `None` when the Q left
    /// no email address.
    pub fn reminder(
        &self,
        details: &SignupDetails,
        days_before: u32,
    ) -> Result<Option<Email>, tera::Error> {
        let Some(to) = details.signup.q_email.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if to.is_empty() {
            return Ok(None);
        }

        let location = &details.location;
        let date = details.signup.date.format("%Y-%m-%d").to_string();
        let vars = json!({
            "q_name": details.signup.q_name,
            "when": lead_time(days_before),
            "fields": [
                { "label": "Location", "value": location.name },
                { "label": "Address", "value": location.address },
                { "label": "Date", "value": date },
                { "label": "Time", "value": details.workout.time.format("%H:%M").to_string() },
                { "label": "Type", "value": details.workout.workout_type },
            ],
            "tips": Q_TIPS,
        });

        Ok(Some(Email {
            to_name: details.signup.q_name.clone(),
            to: to.to_string(),
            subject: format!("Reminder: You're Q'ing at {} on {date}", location.name),
            text: self.render("reminder.txt", &vars)?,
            html: self.render("reminder.html", &vars)?,
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use database::entities::{locations, signups, workouts};
    use models::days::DayOfWeek;
    use uuid::Uuid;

    fn details(q_email: Option<&str>) -> SignupDetails {
        let now = Utc::now().naive_utc();
        let location = locations::Model {
            id: Uuid::new_v4(),
            name: "Apex".to_string(),
            address: "Hobgood Park, Woodstock, GA".to_string(),
            region: "Cherokee".to_string(),
            latitude: None,
            longitude: None,
            active: true,
            created_at: now,
        };
        let workout = workouts::Model {
            id: Uuid::new_v4(),
            location_id: location.id,
            day_of_week: DayOfWeek::Monday,
            time: NaiveTime::from_hms_opt(5, 30, 0).unwrap(),
            workout_type: "Boot Camp".to_string(),
            active: true,
            created_at: now,
        };
        let signup = signups::Model {
            id: Uuid::new_v4(),
            workout_id: workout.id,
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            q_name: "Slaw & Tinder".to_string(),
            q_email: q_email.map(str::to_string),
            notes: None,
            reminded: false,
            created_at: now,
        };

        SignupDetails {
            signup,
            workout,
            location,
        }
    }

    fn reminder(details: &SignupDetails, days_before: u32) -> Option<Email> {
        Templates::new().unwrap().reminder(details, days_before).unwrap()
    }

    #[test]
    fn test_reminder_content() {
        let email = reminder(&details(Some("slaw@example.com")), 2).unwrap();

        assert_eq!(email.to, "slaw@example.com");
        assert_eq!(email.subject, "Reminder: You're Q'ing at Apex on 2024-01-08");
        assert!(email.text.contains("Q in 2 days"));
        assert!(email.text.contains("Address: Hobgood Park, Woodstock, GA"));
        assert!(email.text.contains("Time: 05:30"));
        assert!(email.text.contains("Type: Boot Camp"));
        assert!(email.text.contains("Hey Slaw & Tinder!"));
        assert!(email.html.contains("Slaw &amp; Tinder"));
        assert!(!email.html.contains("Slaw & Tinder"));
        assert!(email.html.contains("<li>Arrive 10 minutes early to set up</li>"));
    }

    #[test]
    fn test_reminder_lead_time() {
        let email = reminder(&details(Some("slaw@example.com")), 1).unwrap();
        assert!(email.text.contains("Q tomorrow:"));
    }

    #[test]
    fn test_no_reminder_without_email() {
        assert_eq!(reminder(&details(None), 2), None);
        assert_eq!(reminder(&details(Some("  ")), 2), None);
    }
}

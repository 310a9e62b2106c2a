use crate::model::{Agenda, Appointment};
use anyhow::{bail, Result};
use chrono::{Duration, NaiveDateTime};

/// Rappel généré pour un client.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub client_name: String,
    pub appointment_id: String,
    pub notice_at: NaiveDateTime,
    pub content: String,
}

/// Permet de customiser le rendu du message (texte, SMS, etc.).
pub trait ReminderRenderer {
    fn render(
        &self,
        business_name: &str,
        appointment: &Appointment,
        notice_at: NaiveDateTime,
    ) -> String;
}

/// Gabarit texte simple destiné à un futur mail/SMS.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReminder;

impl ReminderRenderer for TextReminder {
    fn render(
        &self,
        business_name: &str,
        appointment: &Appointment,
        notice_at: NaiveDateTime,
    ) -> String {
        format!(
            "Bonjour {name},\n\nTon rendez-vous chez {business} est prévu le {date} à {time} ({duration} min).\nCe message est généré le {notice}.\n\nPense à prévenir en cas d'empêchement.\n",
            name = appointment.client_name,
            business = business_name,
            date = appointment.date,
            time = appointment.start,
            duration = appointment.duration_minutes,
            notice = notice_at,
        )
    }
}

/// Prépare un rappel pour le prochain rendez-vous non annulé d'un client.
pub fn prepare_reminder(
    agenda: &Agenda,
    client_name: &str,
    days_before: i64,
    now: NaiveDateTime,
    renderer: &dyn ReminderRenderer,
) -> Result<Reminder> {
    if days_before < 0 {
        bail!("days_before must be positive");
    }

    let mut upcoming: Vec<&Appointment> = agenda
        .appointments
        .iter()
        .filter(|a| a.client_name == client_name && a.is_active() && a.start_datetime() >= now)
        .collect();

    if upcoming.is_empty() {
        bail!("no upcoming appointment found for client {client_name}");
    }

    upcoming.sort_by_key(|a| a.start_datetime());
    let appointment = upcoming[0];

    let notice_at = appointment.start_datetime() - Duration::days(days_before);

    let content = renderer.render(&agenda.business_name, appointment, notice_at);
    Ok(Reminder {
        client_name: appointment.client_name.clone(),
        appointment_id: appointment.id.as_str().to_string(),
        notice_at,
        content,
    })
}

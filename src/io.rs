use crate::model::{Agenda, Appointment, StaffDaySchedule, TimeOfDay, TimeSlot};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de plannings du personnel depuis CSV:
/// header `staff,day_of_week,is_available,start,end`
pub fn import_staff_schedules_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<(String, StaffDaySchedule)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff = rec.get(0).context("missing staff")?.trim();
        if staff.is_empty() {
            bail!("invalid schedule row (empty staff)");
        }
        let day_of_week: u8 = rec
            .get(1)
            .context("missing day_of_week")?
            .trim()
            .parse()
            .with_context(|| format!("invalid day_of_week for staff {staff}"))?;
        let is_available = parse_bool(rec.get(2).context("missing is_available")?.trim())
            .with_context(|| format!("invalid is_available value for staff {staff}"))?;
        let start = TimeOfDay::parse(rec.get(3).context("missing start")?.trim())
            .map_err(anyhow::Error::msg)?;
        let end = TimeOfDay::parse(rec.get(4).context("missing end")?.trim())
            .map_err(anyhow::Error::msg)?;
        let entry = StaffDaySchedule {
            day_of_week,
            is_available,
            start,
            end,
        };
        entry
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid schedule row for staff {staff}"))?;
        out.push((staff.to_owned(), entry));
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Import de rendez-vous depuis CSV:
/// header `client,staff,date,start,duration_minutes[,status]`
///
/// La colonne `staff` (nom affiché, éventuellement vide) est rendue telle
/// quelle : c'est l'appelant qui la résout vers un identifiant.
pub fn import_appointments_csv<P: AsRef<Path>>(
    path: P,
) -> anyhow::Result<Vec<(Option<String>, Appointment)>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let client = rec.get(0).context("missing client")?.trim();
        if client.is_empty() {
            bail!("invalid appointment row (empty client)");
        }
        let staff = rec
            .get(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let date = rec.get(2).context("missing date")?.trim();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date for client {client}"))?;
        let start = TimeOfDay::parse(rec.get(3).context("missing start")?.trim())
            .map_err(anyhow::Error::msg)?;
        let duration_minutes: u32 = rec
            .get(4)
            .context("missing duration_minutes")?
            .trim()
            .parse()
            .with_context(|| format!("invalid duration for client {client}"))?;
        let mut appointment = Appointment::new(client.to_owned(), date, start, duration_minutes)
            .map_err(anyhow::Error::msg)?;
        if let Some(raw) = rec.get(5) {
            let raw = raw.trim();
            if !raw.is_empty() {
                appointment.status = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid status for client {client}: {raw}"))?;
            }
        }
        out.push((staff, appointment));
    }
    Ok(out)
}

/// Export JSON des créneaux (jolie mise en forme)
pub fn export_slots_json<P: AsRef<Path>>(path: P, slots: &[TimeSlot]) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(slots)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des créneaux: header `id,time,available`
pub fn export_slots_csv<P: AsRef<Path>>(path: P, slots: &[TimeSlot]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["id", "time", "available"])?;
    for slot in slots {
        let time = slot.time.to_string();
        w.write_record([
            slot.id.as_str(),
            time.as_str(),
            if slot.available { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des rendez-vous:
/// header `id,client,staff,date,start,duration_minutes,status`
pub fn export_appointments_csv<P: AsRef<Path>>(path: P, agenda: &Agenda) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "id",
        "client",
        "staff",
        "date",
        "start",
        "duration_minutes",
        "status",
    ])?;
    let mut minutes = itoa::Buffer::new();
    for a in &agenda.appointments {
        let staff = a
            .staff_id
            .as_ref()
            .and_then(|id| agenda.find_staff_by_id(id))
            .map(|m| m.display_name.as_str())
            .unwrap_or("");
        let date = a.date.to_string();
        let start = a.start.to_string();
        w.write_record([
            a.id.as_str(),
            a.client_name.as_str(),
            staff,
            date.as_str(),
            start.as_str(),
            minutes.format(a.duration_minutes),
            a.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

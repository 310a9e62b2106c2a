#![forbid(unsafe_code)]
use chrono::NaiveDate;
use creneau::{
    day_slots, io, prepare_reminder, resolve_day, Agenda, Appointment, AppointmentStatus,
    BusinessId, DayHours, DefaultHours, HoursResolver, JsonStorage, OperatingWindow,
    ResolvedHours, StaffMember, Storage, TextReminder, TimeOfDay, WeekHours,
};
use std::fs;
use tempfile::tempdir;

fn t(raw: &str) -> TimeOfDay {
    TimeOfDay::parse(raw).unwrap()
}

// 2025-06-02 est un lundi (day_of_week = 1).
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn open_day(day_of_week: u8, open: &str, close: &str) -> DayHours {
    DayHours {
        day_of_week,
        is_closed: false,
        open: t(open),
        close: t(close),
        break_start: None,
        break_end: None,
    }
}

#[test]
fn explicit_day_hours_resolve() {
    let week = WeekHours {
        days: vec![open_day(1, "08:00", "18:00")],
    };
    let business = BusinessId::random();
    let resolved =
        resolve_day(Some(&week), monday(), &business, &DefaultHours::new()).unwrap();
    assert!(!resolved.is_fallback());
    let window = resolved.window().expect("window expected");
    assert_eq!(window.open, t("08:00"));
    assert_eq!(window.close, t("18:00"));
}

#[test]
fn closed_day_resolves_closed() {
    let mut day = open_day(1, "08:00", "18:00");
    day.is_closed = true;
    let week = WeekHours { days: vec![day] };
    let business = BusinessId::random();
    let resolved =
        resolve_day(Some(&week), monday(), &business, &DefaultHours::new()).unwrap();
    assert_eq!(resolved, ResolvedHours::Closed);
    assert!(resolved.window().is_none());
}

#[test]
fn day_missing_among_records_is_closed() {
    // des horaires existent, mais pas pour le lundi
    let week = WeekHours {
        days: vec![open_day(3, "08:00", "18:00")],
    };
    let business = BusinessId::random();
    let resolved =
        resolve_day(Some(&week), monday(), &business, &DefaultHours::new()).unwrap();
    assert_eq!(resolved, ResolvedHours::Closed);
}

#[test]
fn no_records_fall_back_to_defaults() {
    let business = BusinessId::random();
    let resolved = resolve_day(None, monday(), &business, &DefaultHours::new()).unwrap();
    assert!(resolved.is_fallback());
    let window = resolved.window().expect("fallback window expected");
    assert_eq!(window.open, t("09:00"));
    assert_eq!(window.close, t("20:00"));
    assert_eq!(window.break_start, Some(t("12:00")));
    assert_eq!(window.break_end, Some(t("14:00")));
    assert_eq!(window.slot_interval_minutes, 30);

    // une table vide compte comme « aucun enregistrement »
    let empty = WeekHours::default();
    let resolved = resolve_day(Some(&empty), monday(), &business, &DefaultHours::new()).unwrap();
    assert!(resolved.is_fallback());
}

#[test]
fn per_business_override_wins_over_global_default() {
    let business = BusinessId::random();
    let custom = OperatingWindow::new(t("07:00"), t("23:00")).unwrap();
    let resolver = DefaultHours::new().with_business(&business, custom.clone());

    assert_eq!(resolver.resolve(&business), Some(custom));

    let other = BusinessId::random();
    let window = resolver.resolve(&other).expect("global default expected");
    assert_eq!(window.open, t("09:00"));
}

#[test]
fn resolver_without_answer_is_unknown() {
    struct NoDefaults;
    impl HoursResolver for NoDefaults {
        fn resolve(&self, _business: &BusinessId) -> Option<OperatingWindow> {
            None
        }
    }

    let business = BusinessId::random();
    let resolved = resolve_day(None, monday(), &business, &NoDefaults).unwrap();
    assert_eq!(resolved, ResolvedHours::Unknown);
}

#[test]
fn invalid_day_record_fails_fast() {
    let week = WeekHours {
        days: vec![open_day(1, "20:00", "09:00")],
    };
    let business = BusinessId::random();
    assert!(resolve_day(Some(&week), monday(), &business, &DefaultHours::new()).is_err());
}

#[test]
fn agenda_roundtrip_via_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agenda.json");
    let storage = JsonStorage::open(&path).unwrap();

    let mut agenda = Agenda::new("Salon du Port");
    agenda.hours = Some(WeekHours {
        days: vec![open_day(1, "09:00", "18:00")],
    });
    let member = StaffMember::new("Amélie");
    let staff_id = member.id.clone();
    agenda.staff.push(member);
    let mut appointment = Appointment::new("Alice".to_string(), monday(), t("10:00"), 60).unwrap();
    appointment.staff_id = Some(staff_id);
    appointment.status = AppointmentStatus::Confirmed;
    agenda.appointments.push(appointment);

    storage.save(&agenda).unwrap();
    let loaded = storage.load().unwrap();
    assert_eq!(loaded, agenda);
}

#[test]
fn booked_intervals_skip_cancelled() {
    let mut agenda = Agenda::new("Salon du Port");
    let kept = Appointment::new("Alice".to_string(), monday(), t("10:00"), 60).unwrap();
    let mut gone = Appointment::new("Bob".to_string(), monday(), t("15:00"), 30).unwrap();
    gone.status = AppointmentStatus::Cancelled;
    agenda.appointments.push(kept);
    agenda.appointments.push(gone);

    let booked = agenda.booked_intervals(None, monday());
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].start, t("10:00"));
}

#[test]
fn booked_intervals_filter_by_staff() {
    let mut agenda = Agenda::new("Salon du Port");
    let amelie = StaffMember::new("Amélie");
    let bruno = StaffMember::new("Bruno");
    let amelie_id = amelie.id.clone();
    agenda.staff.push(amelie);
    agenda.staff.push(bruno.clone());

    let mut first = Appointment::new("Alice".to_string(), monday(), t("10:00"), 60).unwrap();
    first.staff_id = Some(amelie_id.clone());
    let mut second = Appointment::new("Carl".to_string(), monday(), t("11:00"), 30).unwrap();
    second.staff_id = Some(bruno.id.clone());
    agenda.appointments.push(first);
    agenda.appointments.push(second);

    let booked = agenda.booked_intervals(Some(&amelie_id), monday());
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].start, t("10:00"));

    // sans membre : tout le commerce compte
    assert_eq!(agenda.booked_intervals(None, monday()).len(), 2);
}

#[test]
fn import_staff_schedules_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedules.csv");
    fs::write(
        &path,
        "staff,day_of_week,is_available,start,end\n\
         Amélie,1,oui,10:00,14:00\n\
         Amélie,2,non,00:00,00:00\n",
    )
    .unwrap();

    let rows = io::import_staff_schedules_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "Amélie");
    assert!(rows[0].1.is_available);
    assert_eq!(rows[0].1.start, t("10:00"));
    assert!(!rows[1].1.is_available);
}

#[test]
fn import_appointments_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appointments.csv");
    fs::write(
        &path,
        "client,staff,date,start,duration_minutes,status\n\
         Alice,,2025-06-02,10:00,60,confirmed\n\
         Bob,Amélie,2025-06-03,09:30,30,\n",
    )
    .unwrap();

    let rows = io::import_appointments_csv(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].0.is_none());
    assert_eq!(rows[0].1.status, AppointmentStatus::Confirmed);
    assert_eq!(rows[0].1.duration_minutes, 60);
    assert_eq!(rows[1].0.as_deref(), Some("Amélie"));
    assert_eq!(rows[1].1.status, AppointmentStatus::Pending);
}

#[test]
fn reminder_targets_next_upcoming_appointment() {
    let mut agenda = Agenda::new("Salon du Port");
    let mut done = Appointment::new(
        "Alice".to_string(),
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        t("10:00"),
        30,
    )
    .unwrap();
    done.status = AppointmentStatus::Completed;
    let soon = Appointment::new("Alice".to_string(), monday(), t("10:00"), 30).unwrap();
    let later = Appointment::new(
        "Alice".to_string(),
        NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
        t("10:00"),
        30,
    )
    .unwrap();
    let soon_id = soon.id.as_str().to_string();
    agenda.appointments.push(done);
    agenda.appointments.push(later);
    agenda.appointments.push(soon);

    let now = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_time(t("08:00").to_naive_time());
    let reminder = prepare_reminder(&agenda, "Alice", 1, now, &TextReminder).unwrap();
    assert_eq!(reminder.appointment_id, soon_id);
    assert!(reminder.content.contains("Alice"));
    assert!(reminder.content.contains("Salon du Port"));
    assert_eq!(
        reminder.notice_at,
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_time(t("10:00").to_naive_time())
    );

    assert!(prepare_reminder(&agenda, "Zoé", 1, now, &TextReminder).is_err());
}

#[test]
fn export_slots_csv_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slots.csv");

    let window = OperatingWindow::new(t("09:00"), t("10:00")).unwrap();
    let now = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_time(t("08:00").to_naive_time());
    let availability = day_slots(&window, monday(), None, &[], now).unwrap();
    io::export_slots_csv(&path, availability.slots()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("id,time,available"));
    assert!(content.contains("slot-1,09:00,true"));
    assert!(content.contains("slot-2,09:30,true"));
}

#[test]
fn export_appointments_csv_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appointments.csv");

    let mut agenda = Agenda::new("Salon du Port");
    let appointment = Appointment::new("Alice".to_string(), monday(), t("10:00"), 45).unwrap();
    agenda.appointments.push(appointment);
    io::export_appointments_csv(&path, &agenda).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("id,client,staff,date,start,duration_minutes,status"));
    assert!(content.contains("Alice,,2025-06-02,10:00,45,pending"));
}

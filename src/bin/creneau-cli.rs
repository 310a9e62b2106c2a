#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use creneau::{
    availability::{day_slots, DayAvailability},
    hours::{resolve_day, DefaultHours, ResolvedHours},
    io,
    model::{
        Agenda, Appointment, AppointmentId, AppointmentStatus, DayHours, StaffMember, TimeOfDay,
        WeekHours,
    },
    notification::{prepare_reminder, TextReminder},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de prise de rendez-vous (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON d'agenda
    #[arg(long, global = true, default_value = "agenda.json")]
    agenda: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer les créneaux d'une journée
    Slots {
        /// Date cible (AAAA-MM-JJ)
        #[arg(long)]
        date: String,
        /// Membre du personnel (nom affiché)
        #[arg(long)]
        staff: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Définir les horaires d'un jour de semaine (0 = dimanche .. 6 = samedi)
    SetHours {
        #[arg(long)]
        day: u8,
        #[arg(long)]
        closed: bool,
        /// HH:MM
        #[arg(long, default_value = "09:00")]
        open: String,
        /// HH:MM
        #[arg(long, default_value = "20:00")]
        close: String,
        #[arg(long)]
        break_start: Option<String>,
        #[arg(long)]
        break_end: Option<String>,
    },

    /// Ajouter un membre du personnel
    AddStaff {
        #[arg(long)]
        name: String,
    },

    /// Importer des plannings du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des rendez-vous depuis un CSV
    ImportAppointments {
        #[arg(long)]
        csv: String,
    },

    /// Réserver un créneau, vérifié contre le moteur de disponibilité
    Book {
        #[arg(long)]
        client: String,
        #[arg(long)]
        staff: Option<String>,
        /// Date cible (AAAA-MM-JJ)
        #[arg(long)]
        date: String,
        /// Heure de début (HH:MM)
        #[arg(long)]
        start: String,
        #[arg(long, default_value_t = 30)]
        duration: u32,
    },

    /// Annuler un rendez-vous
    Cancel {
        #[arg(long)]
        id: String,
    },

    /// Lister les rendez-vous et optionnellement exporter
    List {
        /// Restreindre à une date (AAAA-MM-JJ)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Générer un rappel texte pour un client
    Notify {
        #[arg(long)]
        client: String,
        #[arg(long, default_value_t = 2)]
        days_before: i64,
        /// Fichier de sortie (texte brut)
        #[arg(long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.agenda)?;
    let mut agenda = storage.load_or_else(|| Agenda::new("salon"));

    let code = match cli.cmd {
        Commands::Slots {
            date,
            staff,
            out_json,
            out_csv,
        } => {
            let date = parse_date(&date)?;
            let member = match staff.as_deref() {
                Some(name) => Some(
                    agenda
                        .find_staff_by_name(name)
                        .ok_or_else(|| anyhow::anyhow!("unknown staff: {name}"))?,
                ),
                None => None,
            };
            let booked = agenda.booked_intervals(member.map(|m| &m.id), date);
            let resolver = DefaultHours::new();
            let resolved = resolve_day(agenda.hours.as_ref(), date, &agenda.business_id, &resolver)?;
            let fallback = resolved.is_fallback();
            match resolved {
                ResolvedHours::Unknown => bail!("no hours known for this business"),
                ResolvedHours::Closed => {
                    println!("Fermé ce jour-là");
                    // Code 2 = jour fermé
                    2
                }
                ResolvedHours::Explicit(window) | ResolvedHours::Fallback(window) => {
                    if fallback {
                        eprintln!("Horaires inconnus : défauts affichés");
                    }
                    let now = Local::now().naive_local();
                    match day_slots(&window, date, member.map(|m| m.week.as_slice()), &booked, now)?
                    {
                        DayAvailability::StaffOff => {
                            println!("Membre absent ce jour-là");
                            // Code 2 = membre absent
                            2
                        }
                        DayAvailability::Open(slots) => {
                            if let Some(path) = out_json {
                                io::export_slots_json(path, &slots)?;
                            }
                            if let Some(path) = out_csv {
                                io::export_slots_csv(path, &slots)?;
                            }
                            for s in &slots {
                                println!(
                                    "{} | {} | {}",
                                    s.id.as_str(),
                                    s.time,
                                    if s.available { "libre" } else { "occupé" }
                                );
                            }
                            0
                        }
                    }
                }
            }
        }

        Commands::SetHours {
            day,
            closed,
            open,
            close,
            break_start,
            break_end,
        } => {
            let open = TimeOfDay::parse(&open).map_err(anyhow::Error::msg)?;
            let close = TimeOfDay::parse(&close).map_err(anyhow::Error::msg)?;
            let break_start = break_start
                .as_deref()
                .map(TimeOfDay::parse)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let break_end = break_end
                .as_deref()
                .map(TimeOfDay::parse)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let entry = DayHours {
                day_of_week: day,
                is_closed: closed,
                open,
                close,
                break_start,
                break_end,
            };
            entry.validate().map_err(anyhow::Error::msg)?;
            agenda.hours.get_or_insert_with(WeekHours::default).upsert(entry);
            storage.save(&agenda)?;
            0
        }

        Commands::AddStaff { name } => {
            let member = StaffMember::new(name.as_str());
            println!("{} | {}", member.id.as_str(), member.display_name);
            agenda.staff.push(member);
            storage.save(&agenda)?;
            0
        }

        Commands::ImportStaff { csv } => {
            let rows = io::import_staff_schedules_csv(csv)?;
            for (name, entry) in rows {
                if agenda.find_staff_by_name(&name).is_none() {
                    agenda.staff.push(StaffMember::new(name.as_str()));
                }
                if let Some(member) = agenda.find_staff_mut_by_name(&name) {
                    member.set_day(entry);
                }
            }
            storage.save(&agenda)?;
            0
        }

        Commands::ImportAppointments { csv } => {
            let rows = io::import_appointments_csv(csv)?;
            for (staff_name, mut appointment) in rows {
                if let Some(name) = staff_name {
                    let member = agenda
                        .find_staff_by_name(&name)
                        .ok_or_else(|| anyhow::anyhow!("unknown staff: {name}"))?;
                    appointment.staff_id = Some(member.id.clone());
                }
                agenda.appointments.push(appointment);
            }
            storage.save(&agenda)?;
            0
        }

        Commands::Book {
            client,
            staff,
            date,
            start,
            duration,
        } => {
            let date = parse_date(&date)?;
            let start = TimeOfDay::parse(&start).map_err(anyhow::Error::msg)?;
            let (member_id, staff_week) = match staff.as_deref() {
                Some(name) => {
                    let member = agenda
                        .find_staff_by_name(name)
                        .ok_or_else(|| anyhow::anyhow!("unknown staff: {name}"))?;
                    (Some(member.id.clone()), Some(member.week.clone()))
                }
                None => (None, None),
            };
            let booked = agenda.booked_intervals(member_id.as_ref(), date);
            let resolver = DefaultHours::new();
            let resolved = resolve_day(agenda.hours.as_ref(), date, &agenda.business_id, &resolver)?;
            let Some(window) = resolved.window() else {
                bail!("business closed or hours unknown on {date}");
            };
            let now = Local::now().naive_local();
            let availability = day_slots(window, date, staff_week.as_deref(), &booked, now)?;
            if availability.is_staff_off() {
                bail!("staff member off on {date}");
            }
            let slot = availability
                .slots()
                .iter()
                .find(|s| s.time == start)
                .ok_or_else(|| anyhow::anyhow!("no slot starts at {start}"))?;
            if !slot.available {
                bail!("slot {start} is not available");
            }
            let mut appointment =
                Appointment::new(client, date, start, duration).map_err(anyhow::Error::msg)?;
            appointment.staff_id = member_id;
            println!(
                "Appointment {} pending for {} {}",
                appointment.id.as_str(),
                date,
                start
            );
            agenda.appointments.push(appointment);
            storage.save(&agenda)?;
            0
        }

        Commands::Cancel { id } => {
            let id = AppointmentId::new(id);
            let Some(appointment) = agenda.find_appointment_mut(&id) else {
                bail!("unknown appointment: {}", id.as_str());
            };
            appointment.status = AppointmentStatus::Cancelled;
            storage.save(&agenda)?;
            0
        }

        Commands::List { date, out_csv } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            if let Some(path) = out_csv {
                io::export_appointments_csv(path, &agenda)?;
            }
            // impression compacte
            for a in &agenda.appointments {
                if date.is_some_and(|d| a.date != d) {
                    continue;
                }
                let staff = a
                    .staff_id
                    .as_ref()
                    .and_then(|id| agenda.find_staff_by_id(id))
                    .map(|m| m.display_name.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} {} | {} | {} | {}",
                    a.id.as_str(),
                    a.date,
                    a.start,
                    a.client_name,
                    staff,
                    a.status
                );
            }
            0
        }

        Commands::Notify {
            client,
            days_before,
            out,
        } => {
            let renderer = TextReminder;
            let reminder = prepare_reminder(
                &agenda,
                &client,
                days_before,
                Local::now().naive_local(),
                &renderer,
            )?;
            std::fs::write(&out, reminder.content)?;
            println!(
                "Reminder generated for {} (appointment {}) at {}",
                reminder.client_name, reminder.appointment_id, reminder.notice_at
            );
            0
        }
    };

    std::process::exit(code);
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

#![forbid(unsafe_code)]
//! Creneau — bibliothèque de calcul de créneaux de rendez-vous locale (sans BD).
//!
//! - Stockage fichiers (JSON/CSV).
//! - Génération de créneaux : horaires d'ouverture × pause × planning du
//!   personnel × réservations existantes.
//! - Résolution d'horaires avec défauts explicites, jamais confondus avec un
//!   jour fermé.
//! - Minutes depuis minuit en interne ; `HH:MM` aux frontières ; l'« instant
//!   courant » est injecté par l'appelant.

pub mod availability;
pub mod hours;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod notification;
#[cfg(feature = "serde")]
pub mod storage;

pub use availability::{candidate_times, day_slots, AvailabilityError, DayAvailability};
pub use hours::{resolve_day, DefaultHours, HoursResolver, ResolvedHours};
pub use model::{
    Agenda, Appointment, AppointmentId, AppointmentStatus, BookedInterval, BusinessId, DayHours,
    OperatingWindow, SlotId, StaffDaySchedule, StaffId, StaffMember, TimeOfDay, TimeSlot,
    WeekHours,
};
pub use notification::{prepare_reminder, Reminder, ReminderRenderer, TextReminder};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Heure de la journée en minutes depuis minuit (0..1440).
///
/// Toute l'arithmétique se fait en minutes entières ; le format `HH:MM`
/// n'apparaît qu'aux frontières (parsing, affichage, sérialisation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    /// Construit depuis des minutes depuis minuit, en validant la borne.
    pub fn from_minutes(minutes: u16) -> Result<Self, String> {
        if minutes >= Self::MINUTES_PER_DAY {
            return Err(format!("time of day out of range: {minutes} minutes"));
        }
        Ok(Self(minutes))
    }

    pub(crate) fn from_minutes_unchecked(minutes: u16) -> Self {
        debug_assert!(minutes < Self::MINUTES_PER_DAY);
        Self(minutes)
    }

    /// Parse une heure `HH:MM` (24 h).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let Some((hours, minutes)) = raw.split_once(':') else {
            return Err(format!("invalid time of day: {raw}"));
        };
        let hours: u16 = hours
            .trim()
            .parse()
            .map_err(|_| format!("invalid time of day: {raw}"))?;
        let minutes: u16 = minutes
            .trim()
            .parse()
            .map_err(|_| format!("invalid time of day: {raw}"))?;
        if hours > 23 || minutes > 59 {
            return Err(format!("invalid time of day: {raw}"));
        }
        Ok(Self(hours * 60 + minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.0 / 60), u32::from(self.0 % 60), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

#[cfg(feature = "serde")]
impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Index de jour de semaine façon agenda (0 = dimanche .. 6 = samedi).
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Fenêtre d'ouverture d'une journée : heures d'ouverture, pause éventuelle,
/// pas de génération des créneaux.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperatingWindow {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_start: Option<TimeOfDay>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_end: Option<TimeOfDay>,
    /// Pas des créneaux en minutes (30 par défaut).
    #[cfg_attr(feature = "serde", serde(default = "default_slot_interval"))]
    pub slot_interval_minutes: u16,
}

#[cfg(feature = "serde")]
fn default_slot_interval() -> u16 {
    30
}

impl OperatingWindow {
    /// Crée une fenêtre sans pause en validant `open < close`.
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Result<Self, String> {
        let window = Self {
            open,
            close,
            break_start: None,
            break_end: None,
            slot_interval_minutes: 30,
        };
        window.validate()?;
        Ok(window)
    }

    /// Ajoute une pause `[start, end)`.
    pub fn with_break(mut self, start: TimeOfDay, end: TimeOfDay) -> Result<Self, String> {
        self.break_start = Some(start);
        self.break_end = Some(end);
        self.validate()?;
        Ok(self)
    }

    /// Change le pas de génération.
    pub fn with_interval(mut self, minutes: u16) -> Result<Self, String> {
        self.slot_interval_minutes = minutes;
        self.validate()?;
        Ok(self)
    }

    /// Vérifie les invariants de la fenêtre.
    pub fn validate(&self) -> Result<(), String> {
        if self.open >= self.close {
            return Err("close must be after open".to_string());
        }
        if self.slot_interval_minutes == 0 {
            return Err("slot interval must be > 0".to_string());
        }
        match (self.break_start, self.break_end) {
            (None, None) => {}
            (Some(start), Some(end)) => {
                if start >= end {
                    return Err("break end must be after break start".to_string());
                }
                if start < self.open || end > self.close {
                    return Err("break must fit inside opening hours".to_string());
                }
            }
            _ => return Err("break start and break end must both be set".to_string()),
        }
        Ok(())
    }
}

/// Disponibilité d'un membre du personnel pour un jour de semaine.
///
/// L'absence d'entrée pour un jour signifie « disponibilité par défaut du
/// commerce » ; `is_available = false` ferme la journée entière.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffDaySchedule {
    pub day_of_week: u8,
    pub is_available: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl StaffDaySchedule {
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err(format!("day_of_week out of range: {}", self.day_of_week));
        }
        if self.is_available && self.start >= self.end {
            return Err("schedule end must be after start".to_string());
        }
        Ok(())
    }
}

/// Entrée de planning pour un jour donné, s'il en existe une.
pub fn schedule_for_day(week: &[StaffDaySchedule], day_of_week: u8) -> Option<&StaffDaySchedule> {
    week.iter().find(|s| s.day_of_week == day_of_week)
}

/// Intervalle réservé `[start, start + duration)` sur une journée.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BookedInterval {
    pub start: TimeOfDay,
    pub duration_minutes: u32,
}

impl BookedInterval {
    /// Crée un intervalle en validant `duration > 0`.
    pub fn new(start: TimeOfDay, duration_minutes: u32) -> Result<Self, String> {
        let interval = Self {
            start,
            duration_minutes,
        };
        interval.validate()?;
        Ok(interval)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.duration_minutes == 0 {
            return Err("duration must be > 0".to_string());
        }
        Ok(())
    }

    pub fn end_minutes(&self) -> u32 {
        u32::from(self.start.minutes()) + self.duration_minutes
    }

    /// Demi-ouvert : contient `start`, exclut la fin.
    pub fn covers(&self, minutes: u16) -> bool {
        let m = u32::from(minutes);
        m >= u32::from(self.start.minutes()) && m < self.end_minutes()
    }
}

/// Identifiant opaque et stable d'un créneau généré.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotId(String);

impl SlotId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    /// Identifiant séquentiel (`slot-1`, `slot-2`, ...), déterministe pour des
    /// entrées identiques.
    pub fn from_index(index: usize) -> Self {
        Self(format!("slot-{index}"))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Créneau candidat produit par le moteur.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    pub id: SlotId,
    pub time: TimeOfDay,
    pub available: bool,
}

/// Horaires enregistrés pour un jour de semaine (ligne d'agenda hebdomadaire).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayHours {
    pub day_of_week: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_closed: bool,
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_start: Option<TimeOfDay>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub break_end: Option<TimeOfDay>,
}

impl DayHours {
    pub fn validate(&self) -> Result<(), String> {
        if self.day_of_week > 6 {
            return Err(format!("day_of_week out of range: {}", self.day_of_week));
        }
        if !self.is_closed {
            self.to_window()?;
        }
        Ok(())
    }

    /// Fenêtre d'ouverture correspondante (pas de 30 minutes).
    pub fn to_window(&self) -> Result<OperatingWindow, String> {
        let window = OperatingWindow::new(self.open, self.close)?;
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => window.with_break(start, end),
            _ => Ok(window),
        }
    }
}

/// Horaires hebdomadaires d'un commerce.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeekHours {
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: Vec<DayHours>,
}

impl WeekHours {
    pub fn day(&self, day_of_week: u8) -> Option<&DayHours> {
        self.days.iter().find(|d| d.day_of_week == day_of_week)
    }

    /// Remplace ou insère l'entrée d'un jour.
    pub fn upsert(&mut self, day: DayHours) {
        match self
            .days
            .iter_mut()
            .find(|d| d.day_of_week == day.day_of_week)
        {
            Some(existing) => *existing = day,
            None => self.days.push(day),
        }
    }
}

/// Identifiant fort pour un commerce
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusinessId(String);

impl BusinessId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour un membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour un rendez-vous
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membre du personnel et son planning hebdomadaire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffMember {
    pub id: StaffId,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub week: Vec<StaffDaySchedule>,
}

impl StaffMember {
    pub fn new<D: Into<String>>(display_name: D) -> Self {
        Self {
            id: StaffId::random(),
            display_name: display_name.into(),
            week: Vec::new(),
        }
    }

    /// Remplace ou insère l'entrée de planning d'un jour.
    pub fn set_day(&mut self, entry: StaffDaySchedule) {
        match self
            .week
            .iter_mut()
            .find(|d| d.day_of_week == entry.day_of_week)
        {
            Some(existing) => *existing = entry,
            None => self.week.push(entry),
        }
    }
}

/// Statut d'un rendez-vous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("unknown status: {raw}")),
        }
    }
}

/// Rendez-vous committé sur l'agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Appointment {
    pub id: AppointmentId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub staff_id: Option<StaffId>,
    pub client_name: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Crée un rendez-vous `pending` en validant `duration > 0`.
    pub fn new(
        client_name: String,
        date: NaiveDate,
        start: TimeOfDay,
        duration_minutes: u32,
    ) -> Result<Self, String> {
        if duration_minutes == 0 {
            return Err("duration must be > 0".to_string());
        }
        Ok(Self {
            id: AppointmentId::random(),
            staff_id: None,
            client_name,
            date,
            start,
            duration_minutes,
            status: AppointmentStatus::Pending,
        })
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.start.to_naive_time())
    }

    /// Compte dans l'occupation tant qu'il n'est pas annulé.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }

    pub fn booked_interval(&self) -> BookedInterval {
        BookedInterval {
            start: self.start,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Agenda complet d'un commerce
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Agenda {
    pub business_id: BusinessId,
    pub business_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hours: Option<WeekHours>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub staff: Vec<StaffMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub appointments: Vec<Appointment>,
}

impl Agenda {
    pub fn new<N: Into<String>>(business_name: N) -> Self {
        Self {
            business_id: BusinessId::random(),
            business_name: business_name.into(),
            hours: None,
            staff: Vec::new(),
            appointments: Vec::new(),
        }
    }

    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a StaffMember> {
        self.staff.iter().find(|m| &m.id == id)
    }
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a StaffMember> {
        self.staff.iter().find(|m| m.display_name == name)
    }
    pub fn find_staff_mut_by_name(&mut self, name: &str) -> Option<&mut StaffMember> {
        self.staff.iter_mut().find(|m| m.display_name == name)
    }
    pub fn find_appointment_mut(&mut self, id: &AppointmentId) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| &a.id == id)
    }

    /// Intervalles occupés d'une date, hors rendez-vous annulés.
    ///
    /// Avec un membre donné, seuls ses rendez-vous comptent ; sans membre,
    /// tous les rendez-vous du commerce comptent.
    pub fn booked_intervals(
        &self,
        staff_id: Option<&StaffId>,
        date: NaiveDate,
    ) -> Vec<BookedInterval> {
        self.appointments
            .iter()
            .filter(|a| a.date == date && a.is_active())
            .filter(|a| match staff_id {
                Some(id) => a.staff_id.as_ref() == Some(id),
                None => true,
            })
            .map(Appointment::booked_interval)
            .collect()
    }
}

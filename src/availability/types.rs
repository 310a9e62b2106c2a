use crate::model::TimeSlot;
use thiserror::Error;

/// Résultat du calcul d'une journée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    /// Le membre demandé ne travaille pas ce jour-là : aucun créneau généré.
    StaffOff,
    /// Créneaux de la journée, ordonnés par heure croissante.
    Open(Vec<TimeSlot>),
}

impl DayAvailability {
    pub fn slots(&self) -> &[TimeSlot] {
        match self {
            Self::StaffOff => &[],
            Self::Open(slots) => slots,
        }
    }

    pub fn is_staff_off(&self) -> bool {
        matches!(self, Self::StaffOff)
    }
}

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("invalid operating window: {0}")]
    InvalidWindow(String),
    #[error("invalid staff schedule: {0}")]
    InvalidSchedule(String),
    #[error("invalid booked interval: {0}")]
    InvalidBooking(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

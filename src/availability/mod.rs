mod filter;
mod slots;
mod types;

pub use types::{AvailabilityError, DayAvailability};

use crate::model::{
    schedule_for_day, weekday_index, BookedInterval, OperatingWindow, SlotId, StaffDaySchedule,
    TimeOfDay, TimeSlot,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Heures de départ candidates d'une fenêtre, ordonnées.
pub fn candidate_times(window: &OperatingWindow) -> Result<Vec<TimeOfDay>, AvailabilityError> {
    window.validate().map_err(AvailabilityError::InvalidWindow)?;
    Ok(slots::candidate_minutes(window)
        .into_iter()
        .map(TimeOfDay::from_minutes_unchecked)
        .collect())
}

/// Calcule les créneaux d'une journée pour une fenêtre d'ouverture, un
/// planning de membre éventuel et les réservations existantes.
///
/// Un créneau est indisponible dès qu'une règle le bloque : heures
/// personnelles du membre (`[start, end)`), conflit de réservation
/// (demi-ouvert : un départ exactement à la fin d'une réservation reste
/// libre), heure passée (`minute <= now`, uniquement le jour courant).
///
/// `now` est injecté par l'appelant : jamais d'horloge ici, le résultat est
/// déterministe pour des entrées identiques.
pub fn day_slots(
    window: &OperatingWindow,
    date: NaiveDate,
    staff_week: Option<&[StaffDaySchedule]>,
    booked: &[BookedInterval],
    now: NaiveDateTime,
) -> Result<DayAvailability, AvailabilityError> {
    window.validate().map_err(AvailabilityError::InvalidWindow)?;
    if let Some(week) = staff_week {
        for entry in week {
            entry.validate().map_err(AvailabilityError::InvalidSchedule)?;
        }
    }
    for interval in booked {
        interval.validate().map_err(AvailabilityError::InvalidBooking)?;
    }

    let day_entry = staff_week.and_then(|week| schedule_for_day(week, weekday_index(date)));
    if let Some(entry) = day_entry {
        if !entry.is_available {
            // Journée entière fermée pour ce membre : pas de génération.
            return Ok(DayAvailability::StaffOff);
        }
    }
    let staff_bounds = day_entry.map(|e| (e.start.minutes(), e.end.minutes()));
    let cutoff = filter::cutoff_for(date, now);

    let mut out = Vec::new();
    for minutes in slots::candidate_minutes(window) {
        let gated =
            staff_bounds.is_some_and(|(start, end)| filter::outside_staff_hours(minutes, start, end));
        let taken = filter::booked_blocks(minutes, booked);
        let past = cutoff.is_some_and(|cutoff| minutes <= cutoff);
        out.push(TimeSlot {
            id: SlotId::from_index(out.len() + 1),
            time: TimeOfDay::from_minutes_unchecked(minutes),
            available: !(gated || taken || past),
        });
    }

    Ok(DayAvailability::Open(out))
}

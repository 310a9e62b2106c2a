use crate::model::BookedInterval;
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Minute courante si `date` est la journée de `now`, sinon `None`.
///
/// Les dates futures ne masquent jamais rien, quelle que soit l'heure.
pub(super) fn cutoff_for(date: NaiveDate, now: NaiveDateTime) -> Option<u16> {
    if date == now.date() {
        Some((now.time().hour() * 60 + now.time().minute()) as u16)
    } else {
        None
    }
}

/// Hors des heures personnelles `[start, end)` du membre.
pub(super) fn outside_staff_hours(minutes: u16, start: u16, end: u16) -> bool {
    minutes < start || minutes >= end
}

/// Un intervalle réservé couvre-t-il ce départ de créneau ?
pub(super) fn booked_blocks(minutes: u16, booked: &[BookedInterval]) -> bool {
    booked.iter().any(|b| b.covers(minutes))
}

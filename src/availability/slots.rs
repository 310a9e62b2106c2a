use crate::model::OperatingWindow;

/// Départs candidats en minutes depuis minuit, pas de `slot_interval_minutes`.
///
/// Un candidat n'est émis que si sa période entière tient avant la fermeture
/// (jamais de créneau partiel en fin de journée) ; les départs tombant dans
/// `[break_start, break_end)` sont sautés, pas marqués indisponibles.
pub(super) fn candidate_minutes(window: &OperatingWindow) -> Vec<u16> {
    let close = window.close.minutes();
    let step = window.slot_interval_minutes;

    let break_bounds = match (window.break_start, window.break_end) {
        (Some(start), Some(end)) => Some((start.minutes(), end.minutes())),
        _ => None,
    };

    let mut out = Vec::new();
    let mut minutes = window.open.minutes();
    while minutes + step <= close {
        let in_break = break_bounds.is_some_and(|(start, end)| minutes >= start && minutes < end);
        if !in_break {
            out.push(minutes);
        }
        minutes += step;
    }
    out
}

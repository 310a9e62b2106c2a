use crate::availability::AvailabilityError;
use crate::model::{weekday_index, BusinessId, OperatingWindow, TimeOfDay, WeekHours};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Fournit une fenêtre d'ouverture par défaut pour un commerce.
pub trait HoursResolver {
    /// `None` si aucun défaut n'est connu pour ce commerce.
    fn resolve(&self, business: &BusinessId) -> Option<OperatingWindow>;
}

/// Table statique de défauts par commerce, avec défaut global.
#[derive(Debug, Clone, Default)]
pub struct DefaultHours {
    overrides: HashMap<String, OperatingWindow>,
}

impl DefaultHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre un défaut spécifique à un commerce.
    pub fn with_business(mut self, business: &BusinessId, window: OperatingWindow) -> Self {
        self.overrides.insert(business.as_str().to_owned(), window);
        self
    }

    /// Défaut global : 09:00–20:00, pause 12:00–14:00, pas de 30 minutes.
    pub fn global_default() -> OperatingWindow {
        OperatingWindow {
            open: TimeOfDay::from_minutes_unchecked(9 * 60),
            close: TimeOfDay::from_minutes_unchecked(20 * 60),
            break_start: Some(TimeOfDay::from_minutes_unchecked(12 * 60)),
            break_end: Some(TimeOfDay::from_minutes_unchecked(14 * 60)),
            slot_interval_minutes: 30,
        }
    }
}

impl HoursResolver for DefaultHours {
    fn resolve(&self, business: &BusinessId) -> Option<OperatingWindow> {
        Some(
            self.overrides
                .get(business.as_str())
                .cloned()
                .unwrap_or_else(Self::global_default),
        )
    }
}

/// Fenêtre retenue pour une journée, avec sa provenance.
///
/// « Fermé » et « horaires inconnus » ne sont jamais confondus : le premier
/// vient d'enregistrements présents, le second déclenche les défauts du
/// résolveur, signalés `Fallback` pour que l'appelant les affiche comme tels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedHours {
    /// Horaires enregistrés pour ce jour.
    Explicit(OperatingWindow),
    /// Aucun enregistrement : défauts du résolveur.
    Fallback(OperatingWindow),
    /// Jour explicitement fermé (enregistrements présents, jour absent ou
    /// marqué fermé).
    Closed,
    /// Ni enregistrements ni défauts connus.
    Unknown,
}

impl ResolvedHours {
    pub fn window(&self) -> Option<&OperatingWindow> {
        match self {
            Self::Explicit(window) | Self::Fallback(window) => Some(window),
            Self::Closed | Self::Unknown => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Résout la fenêtre d'une journée à partir des horaires hebdomadaires
/// enregistrés, ou des défauts du résolveur quand il n'y en a aucun.
pub fn resolve_day(
    week: Option<&WeekHours>,
    date: NaiveDate,
    business: &BusinessId,
    resolver: &dyn HoursResolver,
) -> Result<ResolvedHours, AvailabilityError> {
    if let Some(week) = week.filter(|w| !w.days.is_empty()) {
        return match week.day(weekday_index(date)) {
            Some(day) if !day.is_closed => {
                let window = day
                    .to_window()
                    .map_err(AvailabilityError::InvalidWindow)?;
                Ok(ResolvedHours::Explicit(window))
            }
            _ => Ok(ResolvedHours::Closed),
        };
    }
    match resolver.resolve(business) {
        Some(window) => Ok(ResolvedHours::Fallback(window)),
        None => Ok(ResolvedHours::Unknown),
    }
}

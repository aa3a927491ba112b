// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Readiness of the dependencies of a `NodeSet` pass.
//!
//! "Not ready yet" and "nothing to converge" are values, not errors: every
//! stage returns a [`Readiness`] and only failed API calls surface as
//! [`NetworkError`].

#[allow(clippy::wildcard_imports)]
use super::types::*;

/// Readiness of a dependency, carrying its data once ready.
#[derive(Clone, Debug, PartialEq)]
pub enum Readiness<T> {
    /// The dependency is ready and produced `T`.
    Ready(T),
    /// The dependency exists but has not converged yet.
    Waiting,
    /// There is nothing to converge.
    NotApplicable,
}

/// Reservations of every participating node, keyed by node name.
pub type ReservationMap = BTreeMap<String, Vec<Reservation>>;

/// Reduce read-back reservations to one readiness.
///
/// No reservation at all is [`Readiness::NotApplicable`]. Otherwise the result
/// is [`Readiness::Ready`] only if every reservation's `Ready` condition is
/// confirmed `True`; a missing, `False` or `Unknown` condition is
/// [`Readiness::Waiting`]. Scan order does not affect the outcome.
#[must_use]
pub fn aggregate_reservations(reservations: &[IPReservation]) -> Readiness<ReservationMap> {
    if reservations.is_empty() {
        return Readiness::NotApplicable;
    }

    let mut map = ReservationMap::new();
    for reservation in reservations {
        let Some(status) = reservation.status.as_ref() else {
            debug!(reservation = %reservation.name_any(), "IPReservation has no status yet");
            return Readiness::Waiting;
        };
        if !is_ready(&status.conditions) {
            debug!(reservation = %reservation.name_any(), "IPReservation not ready");
            return Readiness::Waiting;
        }
        map.insert(reservation.name_any(), status.reservations.clone());
    }

    Readiness::Ready(map)
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod readiness_tests;

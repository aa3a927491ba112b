// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Mapping of pass outcomes onto the named conditions of a `NodeSet`.
//!
//! | State           | status  | reason          | severity |
//! |-----------------|---------|-----------------|----------|
//! | `Ready`         | `True`  | `Ready`         | -        |
//! | `NotApplicable` | `True`  | `NotApplicable` | -        |
//! | `Waiting`       | `False` | `Requested`     | `Info`   |
//! | `Error`         | `False` | `Error`         | `Error`  |

#[allow(clippy::wildcard_imports)]
use super::types::*;

use super::readiness::Readiness;
use crate::crd::Condition;
use crate::metrics;

/// Externally observable state of one feature of a `NodeSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionState {
    Ready,
    Waiting,
    Error,
    NotApplicable,
}

impl ConditionState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Waiting => "Waiting",
            Self::Error => "Error",
            Self::NotApplicable => "NotApplicable",
        }
    }

    /// Condition `status` for this state.
    #[must_use]
    pub fn status(self) -> &'static str {
        match self {
            Self::Ready | Self::NotApplicable => "True",
            Self::Waiting | Self::Error => "False",
        }
    }

    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ready => REASON_READY,
            Self::Waiting => REASON_REQUESTED,
            Self::Error => REASON_ERROR,
            Self::NotApplicable => REASON_NOT_APPLICABLE,
        }
    }

    #[must_use]
    pub fn severity(self) -> Option<&'static str> {
        match self {
            Self::Ready | Self::NotApplicable => None,
            Self::Waiting => Some(SEVERITY_INFO),
            Self::Error => Some(SEVERITY_ERROR),
        }
    }

    /// Whether the feature still has work to do.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Waiting | Self::Error)
    }

    /// Read the state back from a stored condition.
    #[must_use]
    pub fn from_condition(condition: &Condition) -> Self {
        match (condition.status.as_str(), condition.reason.as_deref()) {
            ("True", Some(REASON_NOT_APPLICABLE)) => Self::NotApplicable,
            ("True", _) => Self::Ready,
            (_, Some(REASON_ERROR)) => Self::Error,
            _ => Self::Waiting,
        }
    }
}

impl<T> From<&Readiness<T>> for ConditionState {
    fn from(readiness: &Readiness<T>) -> Self {
        match readiness {
            Readiness::Ready(_) => Self::Ready,
            Readiness::Waiting => Self::Waiting,
            Readiness::NotApplicable => Self::NotApplicable,
        }
    }
}

/// A feature of a `NodeSet` tracked by its own condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    IpReservation,
    DnsData,
}

impl Feature {
    #[must_use]
    pub fn condition_type(self) -> &'static str {
        match self {
            Self::IpReservation => CONDITION_TYPE_IP_RESERVATION_READY,
            Self::DnsData => CONDITION_TYPE_DNS_DATA_READY,
        }
    }

    #[must_use]
    pub fn message(self, state: ConditionState) -> &'static str {
        match (self, state) {
            (Self::IpReservation, ConditionState::Ready) => IP_RESERVATION_READY_MESSAGE,
            (Self::IpReservation, ConditionState::Waiting) => IP_RESERVATION_WAITING_MESSAGE,
            (Self::IpReservation, ConditionState::Error) => IP_RESERVATION_ERROR_MESSAGE,
            (Self::IpReservation, ConditionState::NotApplicable) => {
                IP_RESERVATION_NOT_APPLICABLE_MESSAGE
            }
            (Self::DnsData, ConditionState::Ready) => DNS_DATA_READY_MESSAGE,
            (Self::DnsData, ConditionState::Waiting) => DNS_DATA_WAITING_MESSAGE,
            (Self::DnsData, ConditionState::Error) => DNS_DATA_ERROR_MESSAGE,
            (Self::DnsData, ConditionState::NotApplicable) => DNS_DATA_NOT_APPLICABLE_MESSAGE,
        }
    }
}

/// Write a condition and count it as a transition when its state changed.
fn set_state(
    updater: &mut NodeSetStatusUpdater,
    condition_type: &str,
    state: ConditionState,
    message: &str,
) {
    let previous = updater
        .condition(condition_type)
        .map(ConditionState::from_condition);
    updater.set_condition(
        condition_type,
        state.status(),
        state.reason(),
        state.severity(),
        message,
    );
    if previous != Some(state) {
        metrics::record_condition_transition(condition_type, state.as_str());
    }
}

/// Set the condition of `feature` to `state`.
///
/// `detail`, when given, is appended to the state's message.
pub fn mark(
    updater: &mut NodeSetStatusUpdater,
    feature: Feature,
    state: ConditionState,
    detail: Option<&str>,
) {
    let message = match detail {
        Some(detail) => format!("{}: {detail}", feature.message(state)),
        None => feature.message(state).to_string(),
    };
    set_state(updater, feature.condition_type(), state, &message);
}

/// Derive the overall `Ready` condition from the feature conditions.
///
/// `Ready` is `True` unless a feature is waiting or failed. A feature without
/// a condition yet counts as waiting.
pub fn mark_overall(updater: &mut NodeSetStatusUpdater) -> ConditionState {
    let states: Vec<ConditionState> = [Feature::IpReservation, Feature::DnsData]
        .into_iter()
        .map(|feature| {
            updater
                .condition(feature.condition_type())
                .map_or(ConditionState::Waiting, ConditionState::from_condition)
        })
        .collect();

    let (state, message) = if states.contains(&ConditionState::Error) {
        (ConditionState::Error, NODESET_ERROR_MESSAGE)
    } else if states.contains(&ConditionState::Waiting) {
        (ConditionState::Waiting, NODESET_WAITING_MESSAGE)
    } else {
        (ConditionState::Ready, NODESET_READY_MESSAGE)
    };

    set_state(updater, CONDITION_TYPE_READY, state, message);
    state
}

#[cfg(test)]
#[path = "conditions_tests.rs"]
mod conditions_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `status_reasons.rs`

#[cfg(test)]
mod tests {
    use crate::status_reasons::*;

    #[test]
    fn test_condition_types_are_distinct() {
        let types = [
            CONDITION_TYPE_READY,
            CONDITION_TYPE_IP_RESERVATION_READY,
            CONDITION_TYPE_DNS_DATA_READY,
        ];
        for (i, a) in types.iter().enumerate() {
            for b in &types[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_reasons_are_pascal_case() {
        for reason in [REASON_READY, REASON_REQUESTED, REASON_ERROR, REASON_NOT_APPLICABLE] {
            assert!(reason.chars().next().is_some_and(char::is_uppercase), "{reason}");
            assert!(!reason.contains(' '), "{reason}");
        }
    }
}

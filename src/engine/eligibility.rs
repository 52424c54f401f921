use chrono::{Duration, NaiveDate};

use crate::domain::PolicyStatus;

/// Advance-eligibility rule for one policy.
///
/// Eligible iff the latest status is active and the policy was submitted at
/// least `eligibility_days` before `today`. The boundary is inclusive: a
/// policy submitted exactly `eligibility_days` ago is eligible.
///
/// `today` is threaded in by the caller (it comes from configuration), never
/// read from a clock here, so the rule is a pure predicate.
pub fn is_eligible(
    submit_date: NaiveDate,
    latest_status: PolicyStatus,
    today: NaiveDate,
    eligibility_days: i64,
) -> bool {
    latest_status == PolicyStatus::Active
        && submit_date <= today - Duration::days(eligibility_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let today = date("2025-07-06");
        // Exactly 7 days before today: eligible
        assert!(is_eligible(
            date("2025-06-29"),
            PolicyStatus::Active,
            today,
            7
        ));
        // One day inside the window: not eligible
        assert!(!is_eligible(
            date("2025-06-30"),
            PolicyStatus::Active,
            today,
            7
        ));
        // Well outside the window: eligible
        assert!(is_eligible(
            date("2025-05-01"),
            PolicyStatus::Active,
            today,
            7
        ));
    }

    #[test]
    fn cancelled_is_never_eligible() {
        let today = date("2025-07-06");
        assert!(!is_eligible(
            date("2025-01-01"),
            PolicyStatus::Cancelled,
            today,
            7
        ));
    }

    #[test]
    fn window_length_is_configurable() {
        let today = date("2025-07-06");
        assert!(is_eligible(
            date("2025-07-06"),
            PolicyStatus::Active,
            today,
            0
        ));
        assert!(!is_eligible(
            date("2025-06-29"),
            PolicyStatus::Active,
            today,
            14
        ));
        assert!(is_eligible(
            date("2025-06-22"),
            PolicyStatus::Active,
            today,
            14
        ));
    }
}

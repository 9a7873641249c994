use crate::data_model::RunOutcome;

/// Renders a run outcome into the caller-facing summary line.
///
/// Three cases: empty selection, full success, partial success. Runs with
/// skipped tweets are still reported as completed; the counts carry the
/// information.
pub fn summary(outcome: &RunOutcome) -> String {
    if outcome.total_selected == 0 {
        return "No tweets found in the requested date range.".to_string();
    }

    format!(
        "Annotation complete. {} of {} tweets updated in {:.2} seconds.",
        outcome.successfully_updated, outcome.total_selected, outcome.elapsed_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_has_distinguished_message() {
        let outcome = RunOutcome::empty();
        assert_eq!(summary(&outcome), "No tweets found in the requested date range.");
    }

    #[test]
    fn full_success_reports_all_counts() {
        let outcome = RunOutcome {
            total_selected: 5,
            successfully_updated: 5,
            elapsed_secs: 1.234,
        };
        assert_eq!(
            summary(&outcome),
            "Annotation complete. 5 of 5 tweets updated in 1.23 seconds."
        );
    }

    #[test]
    fn partial_success_reports_both_counts() {
        let outcome = RunOutcome {
            total_selected: 4,
            successfully_updated: 2,
            elapsed_secs: 0.5,
        };
        let msg = summary(&outcome);
        assert!(msg.contains("2 of 4"));
    }
}

//! Joining eligibility
//!
//! A candidate is ready to join once the enquiry has an actual date, has no
//! joining date yet, and a follow-up for the same enquiry reads exactly
//! `"Joining"`. Writing the joining date removes the candidate for good.

use std::collections::HashSet;

use crate::models::{EnquiryCandidate, FollowUpRecord};
use crate::row::SheetEntry;

/// Whether one enquiry passes the date checks
pub fn awaiting_joining(candidate: &EnquiryCandidate) -> bool {
    !candidate.actual_date.trim().is_empty() && candidate.joining_date.trim().is_empty()
}

/// Enquiries ready to onboard, in sheet order, at most once per enquiry
/// number.
pub fn ready_to_join(
    enquiries: &[SheetEntry<EnquiryCandidate>],
    follow_ups: &[SheetEntry<FollowUpRecord>],
) -> Vec<SheetEntry<EnquiryCandidate>> {
    let joining: HashSet<&str> = follow_ups
        .iter()
        .filter(|f| f.record.is_joining())
        .map(|f| f.record.enquiry_no.as_str())
        .collect();

    let mut seen = HashSet::new();
    enquiries
        .iter()
        .filter(|e| awaiting_joining(&e.record))
        .filter(|e| joining.contains(e.record.candidate_enquiry_no.as_str()))
        .filter(|e| seen.insert(e.record.candidate_enquiry_no.clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enquiry(row: usize, no: &str, actual: &str, joining: &str) -> SheetEntry<EnquiryCandidate> {
        SheetEntry {
            row_number: row,
            record: EnquiryCandidate {
                candidate_enquiry_no: no.into(),
                actual_date: actual.into(),
                joining_date: joining.into(),
                ..Default::default()
            },
        }
    }

    fn follow_up(no: &str, status: &str) -> SheetEntry<FollowUpRecord> {
        SheetEntry {
            row_number: 2,
            record: FollowUpRecord {
                enquiry_no: no.into(),
                status: status.into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_candidate_with_joining_follow_up_included() {
        let ready = ready_to_join(
            &[enquiry(2, "ENQ-1", "2024-01-01", "")],
            &[follow_up("ENQ-1", "Joining")],
        );
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].row_number, 2);
    }

    #[test]
    fn test_joined_candidate_excluded() {
        let ready = ready_to_join(
            &[enquiry(2, "ENQ-1", "2024-01-01", "2024-02-01")],
            &[follow_up("ENQ-1", "Joining")],
        );
        assert!(ready.is_empty());
    }

    #[test]
    fn test_candidate_without_follow_up_excluded() {
        let ready = ready_to_join(&[enquiry(2, "ENQ-1", "2024-01-01", "")], &[follow_up("ENQ-9", "Joining")]);
        assert!(ready.is_empty());
    }

    #[test]
    fn test_status_must_match_exactly() {
        let enquiries = [enquiry(2, "ENQ-1", "2024-01-01", "")];
        assert!(ready_to_join(&enquiries, &[follow_up("ENQ-1", "joining")]).is_empty());
        assert!(ready_to_join(&enquiries, &[follow_up("ENQ-1", "Joining ")]).is_empty());
        assert!(ready_to_join(&enquiries, &[follow_up("ENQ-1", "Selected")]).is_empty());
    }

    #[test]
    fn test_missing_actual_date_excluded() {
        let ready = ready_to_join(&[enquiry(2, "ENQ-1", "", "")], &[follow_up("ENQ-1", "Joining")]);
        assert!(ready.is_empty());
    }

    #[test]
    fn test_each_enquiry_appears_once_and_filter_is_idempotent() {
        let enquiries = [
            enquiry(2, "ENQ-1", "2024-01-01", ""),
            enquiry(5, "ENQ-1", "2024-01-03", ""),
            enquiry(6, "ENQ-2", "2024-01-04", ""),
        ];
        let follow_ups = [
            follow_up("ENQ-1", "Joining"),
            follow_up("ENQ-1", "Joining"),
            follow_up("ENQ-2", "Joining"),
        ];
        let first = ready_to_join(&enquiries, &follow_ups);
        assert_eq!(
            first.iter().map(|e| e.row_number).collect::<Vec<_>>(),
            vec![2, 6]
        );
        assert_eq!(ready_to_join(&enquiries, &follow_ups), first);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(ready_to_join(&[], &[]).is_empty());
    }
}

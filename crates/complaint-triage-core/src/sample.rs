//! Built-in sample complaints used by `complaint-triage demo`.

use crate::classifier::ComplaintRecord;

const SAMPLE_COMPLAINTS: &[(i64, Option<&str>)] = &[
    (1, Some("My internet connection is really slow and keeps dropping.")),
    (2, Some("I have an incorrect charge on my last bill. Please check.")),
    (3, Some("The application crashed unexpectedly, can you fix this bug?")),
    (4, Some("I'd like to suggest a new feature for the reporting dashboard.")),
    (5, Some("I can't log in, it says error 404.")),
    (6, Some("What is the procedure for account activation?")),
    (7, Some("The customer service was really bad, totally unresponsive.")),
    (8, Some("My payment didn't go through, and I got an invoice reminder.")),
    (9, Some("I want to complain about the constant errors in the software.")),
    (10, None),
];

/// Sample records, one of which has no text
pub fn sample_records() -> Vec<ComplaintRecord> {
    SAMPLE_COMPLAINTS
        .iter()
        .map(|(id, text)| ComplaintRecord::new(*id, *text))
        .collect()
}

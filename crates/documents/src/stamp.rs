//! Issue timestamps and document numbers.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// When a document was issued and under which number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStamp {
    pub issued_at: DateTime<Utc>,
    pub document_number: String,
}

impl DocumentStamp {
    pub fn new(issued_at: DateTime<Utc>, document_number: impl Into<String>) -> Self {
        Self {
            issued_at,
            document_number: document_number.into(),
        }
    }

    /// `YYYY-MM-DD` (UTC).
    pub fn issue_date(&self) -> String {
        self.issued_at.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM:SS` (UTC).
    pub fn issue_time(&self) -> String {
        self.issued_at.format("%H:%M:%S").to_string()
    }
}

/// Generator of partner document numbers.
///
/// Numbers are unix milliseconds, bumped by one whenever two documents are
/// issued within the same millisecond (or the clock steps back), so every
/// number handed out by one sequence is strictly greater than the previous.
#[derive(Debug, Default)]
pub struct DocumentNumberSequence {
    last: AtomicU64,
}

impl DocumentNumberSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_at(&self, now: DateTime<Utc>) -> u64 {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|prev| prev);
        candidate.max(prev.saturating_add(1))
    }

    /// Stamp a document issued at `now`.
    pub fn stamp(&self, now: DateTime<Utc>) -> DocumentStamp {
        DocumentStamp::new(now, self.next_at(now).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).single().unwrap()
    }

    #[test]
    fn formats_issue_date_and_time() {
        let stamp = DocumentStamp::new(Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap(), "1");
        assert_eq!(stamp.issue_date(), "2024-03-09");
        assert_eq!(stamp.issue_time(), "07:05:03");
    }

    #[test]
    fn numbers_follow_the_clock() {
        let seq = DocumentNumberSequence::new();
        assert_eq!(seq.next_at(at(1_700_000_000_000)), 1_700_000_000_000);
        assert_eq!(seq.next_at(at(1_700_000_000_500)), 1_700_000_000_500);
    }

    #[test]
    fn numbers_are_strictly_increasing_within_a_millisecond() {
        let seq = DocumentNumberSequence::new();
        let now = at(1_700_000_000_000);
        let a = seq.next_at(now);
        let b = seq.next_at(now);
        let c = seq.next_at(at(1_699_999_999_000));
        assert!(a < b && b < c, "{a} {b} {c}");
    }

    #[test]
    fn concurrent_callers_never_share_a_number() {
        let seq = std::sync::Arc::new(DocumentNumberSequence::new());
        let now = at(1_700_000_000_000);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seq = seq.clone();
                std::thread::spawn(move || (0..250).map(|_| seq.next_at(now)).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 1000);
    }
}

use serde::Serialize;

use crate::policy::{Bucket, Verdict};

/// Classified outcome of a run, one list of report lines per [`Bucket`].
///
/// Lines within a bucket keep the order in which probes reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    allow_success: Vec<String>,
    allow_failed: Vec<String>,
    deny_success: Vec<String>,
    deny_failed: Vec<String>,
}

impl ResultSet {
    pub(crate) fn record(&mut self, verdict: Verdict) {
        self.bucket_mut(verdict.bucket).push(verdict.message);
    }

    pub fn get(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::AllowSuccess => &self.allow_success,
            Bucket::AllowFailed => &self.allow_failed,
            Bucket::DenySuccess => &self.deny_success,
            Bucket::DenyFailed => &self.deny_failed,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::AllowSuccess => &mut self.allow_success,
            Bucket::AllowFailed => &mut self.allow_failed,
            Bucket::DenySuccess => &mut self.deny_success,
            Bucket::DenyFailed => &mut self.deny_failed,
        }
    }

    pub fn allow_success(&self) -> &[String] {
        &self.allow_success
    }

    pub fn allow_failed(&self) -> &[String] {
        &self.allow_failed
    }

    pub fn deny_success(&self) -> &[String] {
        &self.deny_success
    }

    pub fn deny_failed(&self) -> &[String] {
        &self.deny_failed
    }

    /// Buckets paired with their lines, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        Bucket::ALL.into_iter().map(move |bucket| (bucket, self.get(bucket)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, lines)| lines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn failures(&self) -> usize {
        self.allow_failed.len() + self.deny_failed.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(bucket: Bucket, message: &str) -> Verdict {
        Verdict {
            bucket,
            message: message.to_string(),
        }
    }

    #[test]
    fn record_keeps_arrival_order_per_bucket() {
        let mut results = ResultSet::default();
        results.record(verdict(Bucket::AllowSuccess, "second"));
        results.record(verdict(Bucket::DenySuccess, "other"));
        results.record(verdict(Bucket::AllowSuccess, "first"));

        assert_eq!(results.allow_success(), ["second", "first"]);
        assert_eq!(results.deny_success(), ["other"]);
        assert_eq!(results.len(), 3);
        assert!(!results.has_failures());
    }

    #[test]
    fn failures_count_both_failed_buckets() {
        let mut results = ResultSet::default();
        assert!(results.is_empty());

        results.record(verdict(Bucket::AllowFailed, "a"));
        results.record(verdict(Bucket::DenyFailed, "b"));
        results.record(verdict(Bucket::DenySuccess, "c"));

        assert_eq!(results.failures(), 2);
        assert!(results.has_failures());
    }

    #[test]
    fn serializes_with_bucket_keys() {
        let mut results = ResultSet::default();
        results.record(verdict(Bucket::DenyFailed, "Deny a:1 unexpected success connection"));

        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "allowSuccess": [],
                "allowFailed": [],
                "denySuccess": [],
                "denyFailed": ["Deny a:1 unexpected success connection"],
            })
        );
    }
}

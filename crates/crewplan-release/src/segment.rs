//! Phase segmentation
//!
//! Groups flattened tasks by the leading digit run of their phase label.
//! Tasks without a usable label land in bucket `"0"` and are never dropped.

use crewplan_model::{compare_numeric, FlatTask};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key used for tasks whose label has no leading digits
pub const DEFAULT_PHASE_KEY: &str = "0";

/// Bucket key for a phase label
///
/// Scans from the first character and stops at the first non-digit, so
/// `"12. Launch"` maps to `"12"` and `" 2. Design"` (leading space) maps to
/// [`DEFAULT_PHASE_KEY`].
#[must_use]
pub fn phase_key(label: &str) -> String {
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        DEFAULT_PHASE_KEY.to_string()
    } else {
        digits
    }
}

/// Group tasks into phase buckets, preserving input order within a bucket
pub fn segment(tasks: impl IntoIterator<Item = FlatTask>) -> PhaseBuckets {
    tasks.into_iter().collect()
}

/// Tasks grouped by phase key
///
/// Keys iterate in first-seen order; use [`PhaseBuckets::sorted_keys`] for
/// release order. Serializes as a map in release order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseBuckets {
    buckets: IndexMap<String, Vec<FlatTask>>,
}

impl PhaseBuckets {
    /// Create empty buckets
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one task to the bucket derived from its label
    pub fn insert(&mut self, task: FlatTask) {
        self.buckets.entry(phase_key(&task.phase)).or_default().push(task);
    }

    /// Tasks in a bucket
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[FlatTask]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of buckets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no buckets
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Keys in integer order, so `"10"` follows `"2"`
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_by(|a, b| compare_numeric(a, b));
        keys
    }

    /// Consume into `(key, tasks)` pairs in integer key order
    #[must_use]
    pub fn into_sorted(self) -> Vec<(String, Vec<FlatTask>)> {
        let mut buckets: Vec<(String, Vec<FlatTask>)> = self.buckets.into_iter().collect();
        buckets.sort_by(|(a, _), (b, _)| compare_numeric(a, b));
        buckets
    }

    /// Total tasks across buckets
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

impl FromIterator<FlatTask> for PhaseBuckets {
    fn from_iter<I: IntoIterator<Item = FlatTask>>(iter: I) -> Self {
        let mut buckets = Self::new();
        for task in iter {
            buckets.insert(task);
        }
        buckets
    }
}

impl Serialize for PhaseBuckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for key in self.sorted_keys() {
            map.serialize_entry(key, &self.buckets[key])?;
        }
        map.end()
    }
}

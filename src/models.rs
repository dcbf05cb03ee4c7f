//! Core data models for gofuncount
//!
//! A [`FunctionCount`] is one function's measured span, [`Counts`] groups
//! them by directory or package, and [`Stats`] is the per-group summary
//! derived on demand.

use crate::stats::Sample;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One function (or method) declaration and where it lives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionCount {
    /// Aggregation key: directory path or package name
    pub group: String,
    /// Go package the declaration belongs to
    pub package: String,
    pub name: String,
    pub file_name: PathBuf,
    /// 1-based line of the `func` keyword
    pub starts_at: u32,
    /// 1-based line of the closing brace
    pub ends_at: u32,
}

impl FunctionCount {
    /// Line span of the declaration (`ends_at - starts_at`)
    pub fn lines(&self) -> u32 {
        self.ends_at.saturating_sub(self.starts_at)
    }
}

impl Serialize for FunctionCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FunctionCount", 7)?;
        s.serialize_field("group", &self.group)?;
        s.serialize_field("package", &self.package)?;
        s.serialize_field("function_name", &self.name)?;
        s.serialize_field("file_name", &self.file_name.to_string_lossy())?;
        s.serialize_field("starts_at", &self.starts_at)?;
        s.serialize_field("ends_at", &self.ends_at)?;
        s.serialize_field("lines", &self.lines())?;
        s.end()
    }
}

/// Summary statistics of the line spans in one group.
///
/// Every field is `None` when the group holds no functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    #[serde(rename = "95%ile")]
    pub p95: Option<f64>,
    #[serde(rename = "99%ile")]
    pub p99: Option<f64>,
}

impl Stats {
    pub fn from_sample(sample: &Sample) -> Self {
        Self {
            mean: sample.mean(),
            median: sample.quantile(0.5),
            p95: sample.quantile(0.95),
            p99: sample.quantile(0.99),
        }
    }

    /// True when the group had nothing to measure
    pub fn is_undefined(&self) -> bool {
        self.mean.is_none()
    }
}

/// Function measurements keyed by group.
///
/// Groups iterate in key order; records inside a group keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Counts {
    groups: BTreeMap<String, Vec<FunctionCount>>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a measurement under its own `group`
    pub fn insert(&mut self, count: FunctionCount) {
        self.groups.entry(count.group.clone()).or_default().push(count);
    }

    /// Create an empty entry for `group` if none exists yet
    pub fn ensure_group(&mut self, group: &str) {
        if !self.groups.contains_key(group) {
            self.groups.insert(group.to_string(), Vec::new());
        }
    }

    /// Grouped records as inserted
    pub fn raw(&self) -> &BTreeMap<String, Vec<FunctionCount>> {
        &self.groups
    }

    pub fn get(&self, group: &str) -> Option<&[FunctionCount]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_functions(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Move every group and record of `other` into `self`
    pub fn merge(&mut self, other: Counts) {
        for (group, counts) in other.groups {
            self.groups.entry(group).or_default().extend(counts);
        }
    }

    /// Per-group summary of line spans, one entry per group present
    pub fn stats(&self) -> BTreeMap<String, Stats> {
        self.groups
            .iter()
            .map(|(group, counts)| {
                let sample = Sample::new(counts.iter().map(FunctionCount::lines));
                (group.clone(), Stats::from_sample(&sample))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn count(group: &str, name: &str, starts_at: u32, ends_at: u32) -> FunctionCount {
        FunctionCount {
            group: group.to_string(),
            package: "main".to_string(),
            name: name.to_string(),
            file_name: PathBuf::from("testdata/src/x/x.go"),
            starts_at,
            ends_at,
        }
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("defined value");
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_lines() {
        assert_eq!(count("g", "f", 5, 7).lines(), 2);
        assert_eq!(count("g", "f", 9, 9).lines(), 0);
        assert_eq!(count("g", "f", 9, 3).lines(), 0);
    }

    #[test]
    fn test_stats_for_main_package() {
        let mut counts = Counts::new();
        counts.insert(count("main", "init", 5, 7));
        counts.insert(count("main", "foo", 8, 9));
        counts.insert(count("main", "bar", 10, 13));
        counts.insert(count("main", "bar", 10, 14));

        let stats = counts.stats();
        assert_eq!(stats.len(), 1);
        let main = stats["main"];
        assert_close(main.mean, 2.5);
        assert_close(main.median, 2.5);
        assert_close(main.p95, 3.85);
        assert_close(main.p99, 3.97);
    }

    #[test]
    fn test_duplicate_records_are_kept() {
        let mut counts = Counts::new();
        counts.insert(count("g", "bar", 10, 13));
        counts.insert(count("g", "bar", 10, 13));
        assert_eq!(counts.get("g").map(<[_]>::len), Some(2));
        assert_eq!(counts.total_functions(), 2);
    }

    #[test]
    fn test_two_sizes_one_group() {
        let mut counts = Counts::new();
        counts.insert(count("g", "a", 1, 3));
        counts.insert(count("g", "b", 10, 14));
        let stats = counts.stats();
        assert_eq!(stats.keys().collect::<Vec<_>>(), vec!["g"]);
        assert_close(stats["g"].mean, 3.0);
    }

    #[test]
    fn test_empty_group_is_undefined_not_dropped() {
        let mut counts = Counts::new();
        counts.ensure_group("empty");
        counts.insert(count("full", "f", 1, 2));

        let stats = counts.stats();
        assert_eq!(stats.len(), 2);
        assert!(stats["empty"].is_undefined());
        assert_eq!(stats["empty"], Stats::default());
        assert!(!stats["full"].is_undefined());
        assert_close(stats["full"].median, 1.0);
    }

    #[test]
    fn test_ensure_group_keeps_existing_records() {
        let mut counts = Counts::new();
        counts.insert(count("g", "f", 1, 2));
        counts.ensure_group("g");
        assert_eq!(counts.total_functions(), 1);
    }

    #[test]
    fn test_stats_is_idempotent() {
        let mut counts = Counts::new();
        counts.insert(count("a", "f", 1, 9));
        counts.insert(count("b", "g", 3, 4));
        counts.insert(count("b", "h", 5, 20));
        assert_eq!(counts.stats(), counts.stats());
    }

    #[test]
    fn test_raw_round_trip() {
        let inserted = vec![
            count("a", "f", 1, 9),
            count("b", "g", 3, 4),
            count("a", "h", 5, 20),
            count("a", "h", 5, 20),
        ];
        let mut counts = Counts::new();
        for c in &inserted {
            counts.insert(c.clone());
        }

        let mut retrieved: Vec<FunctionCount> =
            counts.raw().values().flatten().cloned().collect();
        let mut expected = inserted.clone();
        retrieved.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        expected.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        assert_eq!(retrieved, expected);

        for (group, records) in counts.raw() {
            assert!(records.iter().all(|r| &r.group == group));
        }
        let a: Vec<&str> = counts.raw()["a"].iter().map(|r| r.name.as_str()).collect();
        assert_eq!(a, vec!["f", "h", "h"]);
    }

    #[test]
    fn test_merge() {
        let mut left = Counts::new();
        left.insert(count("a", "f", 1, 2));
        let mut right = Counts::new();
        right.insert(count("a", "g", 1, 3));
        right.ensure_group("b");
        left.merge(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.total_functions(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut counts = Counts::new();
        counts.insert(count("testdata/src/x", "init", 5, 7));
        counts.ensure_group("empty");

        let raw = serde_json::to_value(&counts).expect("serialize counts");
        let record = &raw["testdata/src/x"][0];
        assert_eq!(record["function_name"], "init");
        assert_eq!(record["file_name"], "testdata/src/x/x.go");
        assert_eq!(record["starts_at"], 5);
        assert_eq!(record["ends_at"], 7);
        assert_eq!(record["lines"], 2);

        let stats = serde_json::to_value(counts.stats()).expect("serialize stats");
        assert_eq!(stats["testdata/src/x"]["mean"], 2.0);
        assert_eq!(stats["testdata/src/x"]["95%ile"], 2.0);
        assert!(stats["empty"]["median"].is_null());
        assert!(stats["empty"]["99%ile"].is_null());
    }
}

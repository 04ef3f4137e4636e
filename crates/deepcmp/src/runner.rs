//! Failure-capturing boundary around the comparator
//!
//! Callers supply `(message, expected, actual)` triples and get back one
//! displayable string per case. No failure escapes this boundary: mismatch
//! conditions are flattened into the returned string, not raised.

use deepcmp_core::Value;

use crate::compare::{compare, Comparison};

/// One comparison case supplied by a caller
#[derive(Debug, Clone)]
pub struct TestCase {
    pub message: String,
    pub expected: Value,
    pub actual: Value,
}

impl TestCase {
    pub fn new(message: impl Into<String>, expected: Value, actual: Value) -> Self {
        Self {
            message: message.into(),
            expected,
            actual,
        }
    }
}

/// Run one case, flattening the outcome into a displayable string
pub fn run(case: &TestCase) -> String {
    compare(&case.message, &case.expected, &case.actual).summary()
}

/// Run a batch of cases in order, one result line per case
pub fn run_all(cases: &[TestCase]) -> Vec<String> {
    cases.iter().map(run).collect()
}

/// Aggregated outcome of a batch run
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<Comparison>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed())
    }

    /// One displayable line per case, plus a trailing pass-count line
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.results.iter().map(|r| r.summary()).collect();
        lines.push(format!("Results: {}/{} passed", self.passed(), self.total()));
        lines
    }
}

/// Run a batch of cases, keeping the structured outcomes
pub fn run_suite(cases: &[TestCase]) -> RunSummary {
    RunSummary {
        results: cases
            .iter()
            .map(|case| compare(&case.message, &case.expected, &case.actual))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_pass_line() {
        let case = TestCase::new(
            "strings match",
            Value::from(json!("abc")),
            Value::from(json!("abc")),
        );
        let line = run(&case);
        assert!(line.contains("strings match"));
        assert!(line.contains("PASS"));
        assert!(line.contains("abc"));
    }

    #[test]
    fn test_run_fail_line_carries_diagnostic() {
        let case = TestCase::new(
            "objects match",
            Value::from(json!({"a": 1})),
            Value::from(json!({"a": 2})),
        );
        let line = run(&case);
        assert!(line.contains("objects match"));
        assert!(line.contains("FAIL"));
        assert!(line.contains("value mismatch at `a`"));
    }

    #[test]
    fn test_run_all_preserves_order() {
        let cases = vec![
            TestCase::new("first", Value::from(json!(1)), Value::from(json!(1))),
            TestCase::new("second", Value::from(json!(1)), Value::from(json!(2))),
        ];
        let lines = run_all(&cases);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
        assert!(lines[1].contains("FAIL"));
    }

    #[test]
    fn test_run_suite_counts() {
        let cases = vec![
            TestCase::new("ok", Value::Null, Value::Null),
            TestCase::new("bad", Value::from(true), Value::from(false)),
        ];
        let summary = run_suite(&cases);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.total(), 2);
        assert!(!summary.all_passed());
        assert_eq!(summary.lines().last().unwrap(), "Results: 1/2 passed");
    }
}

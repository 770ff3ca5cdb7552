use std::io::Write;
use std::path::Path;

use junit_report::{Duration, ReportBuilder, TestCaseBuilder, TestSuiteBuilder};

use crate::error::ReportError;
use crate::sequence::{Report, Verdict};

impl Report {
    pub fn write_junit<W: Write>(&self, suite: &str, sink: W) -> Result<(), ReportError> {
        let mut test_cases = Vec::with_capacity(self.outcomes.len());

        for o in &self.outcomes {
            let duration = Duration::seconds_f64(o.time_secs);
            let tc = match o.verdict {
                Verdict::Passed => TestCaseBuilder::success(&o.name, duration),
                Verdict::Failed => {
                    TestCaseBuilder::failure(&o.name, duration, "failure", &o.message)
                }
                Verdict::Skipped => TestCaseBuilder::skipped(&o.name),
            }
            .build();
            test_cases.push(tc);
        }

        let test_suite = TestSuiteBuilder::new(suite).add_testcases(test_cases).build();
        let report = ReportBuilder::new().add_testsuite(test_suite).build();
        report
            .write_xml(sink)
            .map_err(|e| ReportError::Junit(format!("{:?}", e)))
    }

    pub fn write_junit_file(&self, suite: &str, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let file = std::fs::File::create(path)?;
        self.write_junit(suite, file)
    }
}

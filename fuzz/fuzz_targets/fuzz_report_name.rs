#![no_main]

use libfuzzer_sys::fuzz_target;
use reef_survey_analyzer::models::{ReportName, SurveyName};

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let report = ReportName::parse(name);
        assert!(!report.date.is_empty());
        assert!(!report.site.is_empty());
        let survey = SurveyName::parse(name);
        assert!(!survey.bait.is_empty());
    }
});

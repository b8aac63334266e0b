#![no_main]

use libfuzzer_sys::fuzz_target;
use reef_survey_analyzer::{
    analysis::{summarize_file, CoralReefRecord},
    io::read_detections_from_bytes,
    models::{AreaType, FRAMES, LABEL_NAME},
};

fuzz_target!(|data: &[u8]| {
    if let Ok(rows) = read_detections_from_bytes(data, "fuzz.csv", &[LABEL_NAME, FRAMES]) {
        let _ = summarize_file("fuzz.csv", AreaType::CoralReef, &rows);
        let _ = CoralReefRecord::from_detections("fuzz.csv", &rows);
    }
});

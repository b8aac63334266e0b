mod detection;
mod report_name;
mod summary;

pub use detection::{labels, Detection, FRAMES, LABEL_HIERARCHY, LABEL_NAME};
pub use report_name::{
    bait_after_camera, bait_before_suffix, bait_info, format_survey_date, is_camera_token,
    leading_date, Location, ReportName, SurveyName, UNKNOWN,
};
pub use summary::{AreaType, FileSummary};

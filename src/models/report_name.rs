//! Metadata encoded in annotation report file names.
//!
//! Report names follow a loose `DATE-SITE-BAIT[-cN][-suffix].csv` convention
//! that drifted between survey seasons. Nothing here fails: a name that does
//! not fit yields `None` or the [`UNKNOWN`] placeholder.

use serde::{Deserialize, Serialize};

/// Placeholder for metadata missing from a file name.
pub const UNKNOWN: &str = "unknown";

/// Suffix marking a full-length ("ganz") video export.
const FULL_VIDEO_SUFFIX: &str = "-ganz.csv";

/// Returns true for camera tokens such as `c3` or `c10`.
pub fn is_camera_token(token: &str) -> bool {
    match token.strip_prefix('c') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Length of a leading `cN-` camera token, if `rest` starts with one.
fn camera_prefix_len(rest: &str) -> Option<usize> {
    let after_c = rest.strip_prefix('c')?;
    let digits = after_c.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || after_c.as_bytes().get(digits) != Some(&b'-') {
        return None;
    }
    Some(digits + 2)
}

/// Lower-cased name with the full-video suffix removed.
fn full_video_stem(file_name: &str) -> Option<String> {
    file_name
        .to_lowercase()
        .strip_suffix(FULL_VIDEO_SUFFIX)
        .map(str::to_string)
}

/// Bait label between the left-most `-cN-` camera token and the `-ganz.csv` suffix.
///
/// `20241025-utumbi-c10-squid-ganz.csv` yields `squid`.
pub fn bait_after_camera(file_name: &str) -> Option<String> {
    let stem = full_video_stem(file_name)?;
    bait_in_stem(&stem)
}

/// Like [`bait_after_camera`] but exact: the name keeps its case, and only a
/// lower-case `-cN-` token and `-ganz.csv` suffix match.
///
/// `25102024-Utumbi-c10-Squid-ganz.csv` yields `Squid`.
pub fn bait_info(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(FULL_VIDEO_SUFFIX)?;
    bait_in_stem(stem)
}

fn bait_in_stem(stem: &str) -> Option<String> {
    stem.match_indices('-').find_map(|(i, _)| {
        let rest = &stem[i + 1..];
        let skip = camera_prefix_len(rest)?;
        let bait = &rest[skip..];
        (!bait.is_empty()).then(|| bait.to_string())
    })
}

/// Everything after the first `-` up to the `-ganz.csv` suffix.
pub fn bait_before_suffix(file_name: &str) -> Option<String> {
    let stem = full_video_stem(file_name)?;
    let (_, rest) = stem.split_once('-')?;
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Leading run of digits terminated by `-`.
pub fn leading_date(file_name: &str) -> Option<String> {
    let digits = file_name.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || file_name.as_bytes().get(digits) != Some(&b'-') {
        return None;
    }
    Some(file_name[..digits].to_string())
}

/// Render an eight-digit `DDMMYYYY` segment as `DD.MM.YYYY`; other segments pass through.
pub fn format_survey_date(segment: &str) -> String {
    if segment.len() == 8 && segment.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}.{}.{}", &segment[0..2], &segment[2..4], &segment[4..8])
    } else {
        segment.to_string()
    }
}

/// Survey location, derived from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    Utumbi,
    Milimani,
}

impl Location {
    /// `Utumbi` when the name mentions it (any case), otherwise `Milimani`.
    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.to_lowercase().contains("utumbi") {
            Location::Utumbi
        } else {
            Location::Milimani
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Utumbi => write!(f, "Utumbi"),
            Location::Milimani => write!(f, "Milimani"),
        }
    }
}

/// Coral reef naming: `DATE-SITE-BAIT[-cN].csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportName {
    pub date: String,
    pub site: String,
    pub bait: String,
    pub camera: Option<String>,
}

impl ReportName {
    /// Parse a coral reef report name.
    ///
    /// # Examples
    ///
    /// ```
    /// use reef_survey_analyzer::models::ReportName;
    ///
    /// let name = ReportName::parse("20241025-milimani-mackerel-c10.csv");
    /// assert_eq!(name.date, "20241025");
    /// assert_eq!(name.site, "milimani");
    /// assert_eq!(name.bait, "mackerel");
    /// assert_eq!(name.camera.as_deref(), Some("c10"));
    /// ```
    pub fn parse(file_name: &str) -> Self {
        let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
        let parts: Vec<&str> = stem.split('-').collect();
        let part = |i: usize| {
            parts
                .get(i)
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        let mut bait = part(2);
        let mut camera = None;
        if let Some(fourth) = parts.get(3) {
            if is_camera_token(fourth) {
                camera = Some(fourth.to_string());
            } else {
                // multi-word bait such as "sardine-squid"
                bait = parts[2..].join("-");
            }
        }

        Self {
            date: part(0),
            site: part(1),
            bait,
            camera,
        }
    }
}

/// Comprehensive-survey naming: `DDMMYYYY-...-cN-BAIT-ganz.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyName {
    pub location: Location,
    pub date: String,
    pub bait: String,
}

impl SurveyName {
    /// Parse a survey report name. Bait falls back from the camera-delimited
    /// form to the suffix-delimited form, then to [`UNKNOWN`].
    pub fn parse(file_name: &str) -> Self {
        let segment = file_name.split('-').next().unwrap_or_default();
        let date = if segment.is_empty() {
            UNKNOWN.to_string()
        } else {
            format_survey_date(segment)
        };
        let bait = bait_after_camera(file_name)
            .or_else(|| bait_before_suffix(file_name))
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            location: Location::from_file_name(file_name),
            date,
            bait,
        }
    }
}

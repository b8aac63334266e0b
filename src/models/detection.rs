use serde::{Deserialize, Serialize};

/// Column holding the species label.
pub const LABEL_NAME: &str = "label_name";
/// Column holding the hierarchical label path.
pub const LABEL_HIERARCHY: &str = "label_hierarchy";
/// Column holding the frame identifier.
pub const FRAMES: &str = "frames";

/// A single annotated individual in a single video frame.
///
/// One row of an annotation export. Frame identifiers are kept as text since
/// the annotation tool emits both integers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Species label (e.g., "Chromis viridis")
    pub label_name: String,
    /// Hierarchical label path (e.g., "Fish/Pomacentridae/Chromis viridis")
    #[serde(default)]
    pub label_hierarchy: Option<String>,
    /// Frame the individual was annotated in
    #[serde(default, rename = "frames")]
    pub frame: Option<String>,
}

impl Detection {
    /// Create a detection without a label hierarchy.
    pub fn new(label_name: impl Into<String>, frame: impl Into<String>) -> Self {
        Self {
            label_name: label_name.into(),
            label_hierarchy: None,
            frame: Some(frame.into()),
        }
    }

    /// Whether the row names a species. A blank `label_name` cell is an
    /// unlabelled annotation.
    pub fn has_label(&self) -> bool {
        !self.label_name.trim().is_empty()
    }

    /// Attach a hierarchical label path.
    pub fn with_hierarchy(mut self, hierarchy: impl Into<String>) -> Self {
        self.label_hierarchy = Some(hierarchy.into());
        self
    }
}

/// Borrow the species labels of a detection table, in row order.
///
/// Unlabelled rows are skipped.
pub fn labels(detections: &[Detection]) -> Vec<&str> {
    detections
        .iter()
        .filter(|d| d.has_label())
        .map(|d| d.label_name.as_str())
        .collect()
}

//! Records shared between catalog assembly, sidecar files and rendering.

/// One catalogued model, before its preview image is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelEntry {
    pub character_name: String,
    pub model_name: String,
    pub series: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl ModelEntry {
    /// Tags joined the way they are displayed and stored: `"Chibi, NSFW"`.
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Contents of a `model-info.txt` sidecar.
///
/// Every known key is optional so a partial or missing file still yields a
/// record. Lines with unrecognised keys are kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInfo {
    pub model_name: Option<String>,
    pub character_name: Option<String>,
    pub series: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl ModelInfo {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Catalog entry view; absent fields become empty strings.
    pub fn to_entry(&self) -> ModelEntry {
        ModelEntry {
            character_name: self.character_name.clone().unwrap_or_default(),
            model_name: self.model_name.clone().unwrap_or_default(),
            series: self.series.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            tags: self.tags.clone(),
        }
    }
}

impl From<&ModelEntry> for ModelInfo {
    fn from(entry: &ModelEntry) -> Self {
        Self {
            model_name: Some(entry.model_name.clone()),
            character_name: Some(entry.character_name.clone()),
            series: Some(entry.series.clone()),
            tags: entry.tags.clone(),
            category: Some(entry.category.clone()),
            extra: Vec::new(),
        }
    }
}

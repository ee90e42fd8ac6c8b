//! `model-info.txt` sidecar files.
//!
//! One `Key: Value` pair per line:
//!
//! ```text
//! Model Name: Hero - Armored
//! Character Name: Hero
//! Series: SeriesA
//! Tags: Chibi, NSFW
//! Model Category: Anime
//! ```
//!
//! Reading is forgiving. Lines split on the first colon, lines without one are
//! ignored, unknown keys are kept, and a missing file is an empty record.

use crate::types::ModelInfo;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const SIDECAR_FILE: &str = "model-info.txt";

const KEY_MODEL_NAME: &str = "Model Name";
const KEY_CHARACTER_NAME: &str = "Character Name";
const KEY_SERIES: &str = "Series";
const KEY_TAGS: &str = "Tags";
const KEY_CATEGORY: &str = "Model Category";

/// Parse sidecar text.
pub fn parse_model_info(content: &str) -> ModelInfo {
    let mut info = ModelInfo::default();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().to_string();
        match key {
            KEY_MODEL_NAME => info.model_name = Some(value),
            KEY_CHARACTER_NAME => info.character_name = Some(value),
            KEY_SERIES => info.series = Some(value),
            KEY_CATEGORY => info.category = Some(value),
            KEY_TAGS => {
                info.tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            _ => info.extra.push((key.to_string(), value)),
        }
    }
    info
}

/// Read `path`, or an empty record if it is missing or unreadable.
pub fn read_model_info(path: &Path) -> ModelInfo {
    match fs::read_to_string(path) {
        Ok(content) => parse_model_info(&content),
        Err(err) => {
            debug!(path = %path.display(), %err, "no readable sidecar, using empty record");
            ModelInfo::default()
        }
    }
}

/// Render a record in sidecar format. The five known keys are always written.
pub fn format_model_info(info: &ModelInfo) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    let mut out = format!(
        "{KEY_MODEL_NAME}: {}\n{KEY_CHARACTER_NAME}: {}\n{KEY_SERIES}: {}\n{KEY_TAGS}: {}\n{KEY_CATEGORY}: {}\n",
        field(&info.model_name),
        field(&info.character_name),
        field(&info.series),
        info.tags.join(", "),
        field(&info.category),
    );
    for (key, value) in &info.extra {
        out.push_str(&format!("{key}: {value}\n"));
    }
    out
}

/// Write `model-info.txt` into `folder`, replacing any existing file.
pub fn write_model_info(folder: &Path, info: &ModelInfo) -> std::io::Result<()> {
    fs::write(folder.join(SIDECAR_FILE), format_model_info(info))
}

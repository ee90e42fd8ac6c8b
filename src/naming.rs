//! Model folder naming convention.
//!
//! Canonical folder names look like:
//!
//! ```text
//! <character>_<version> <digit> - <tag> <tag>
//! Hero_Armored 2 - Chibi NSFW
//! ```
//!
//! Every part after the character is optional. [`parse_model_folder_name`]
//! takes an arbitrary, hand-typed folder name apart and
//! [`compose_canonical_name`] rebuilds it in canonical form. Parsing a
//! canonical name and composing it again yields the same name.
//!
//! Tags are never read positionally. They come from keywords (see
//! [`TagKeyword`]) found anywhere in the name, and every casing of a keyword
//! is stripped from the other parts.
//!
//! [`describe_model_name`] is the display-side reading of a canonical name used
//! when cataloguing: it splits out tags after `" - "` and the `_` version.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Folder name has no character name left after removing tags: {0:?}")]
    EmptyCharacterName(String),
}

/// A keyword that, found anywhere in a folder name, becomes a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagKeyword {
    /// Matched case-insensitively, e.g. `"nsfw"`.
    pub keyword: String,
    /// Canonical tag label, e.g. `"NSFW"`.
    pub label: String,
    /// Extra literal spellings to strip besides lower, Capitalized and UPPER.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

impl TagKeyword {
    pub fn new(keyword: &str, label: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            label: label.to_string(),
            variants: Vec::new(),
        }
    }

    /// Every literal spelling removed from the name parts.
    fn spellings(&self) -> Vec<String> {
        let lower = self.keyword.to_lowercase();
        let mut chars = lower.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        let mut out = vec![lower.clone(), capitalized, self.keyword.to_uppercase()];
        out.extend(self.variants.iter().cloned());
        out.retain(|s| !s.is_empty());
        out.dedup();
        out
    }
}

/// The keyword set used when no configuration overrides it.
pub fn default_tag_keywords() -> Vec<TagKeyword> {
    vec![TagKeyword::new("chibi", "Chibi"), TagKeyword::new("nsfw", "NSFW")]
}

/// A folder name taken apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModelName {
    pub character_name: String,
    /// Text after the first `" - "`, tags removed. `None` when empty.
    pub model_version: Option<String>,
    /// Single trailing digit split off the character name.
    pub version_digit: Option<char>,
    /// Tag labels in keyword order.
    pub tags: Vec<String>,
}

/// Parse a folder basename using `keywords` for tag detection.
pub fn parse_model_folder_name(
    basename: &str,
    keywords: &[TagKeyword],
) -> Result<ParsedModelName, NameError> {
    let lowered = basename.to_lowercase();
    let found: Vec<&TagKeyword> = keywords
        .iter()
        .filter(|k| !k.keyword.is_empty() && lowered.contains(&k.keyword.to_lowercase()))
        .collect();

    let (character, version) = basename.split_once(" - ").unwrap_or((basename, ""));

    // Repeat until stable: removing "chibi" from "chichibibi" leaves "chibi".
    let strip = |text: &str| {
        let mut text = text.to_string();
        loop {
            let before = text.len();
            for keyword in &found {
                for spelling in keyword.spellings() {
                    text = text.replace(&spelling, "");
                }
            }
            if text.len() == before {
                break;
            }
        }
        text.trim().to_string()
    };
    let mut character_name = strip(character);
    let model_version = strip(version);

    if character_name.is_empty() {
        return Err(NameError::EmptyCharacterName(basename.to_string()));
    }

    let version_digit = split_trailing_digit(&mut character_name);

    Ok(ParsedModelName {
        character_name,
        model_version: (!model_version.is_empty()).then_some(model_version),
        version_digit,
        tags: found.iter().map(|k| k.label.clone()).collect(),
    })
}

/// Remove a single `<whitespace><digit>` suffix and return the digit.
///
/// `"Hero 2"` → `Some('2')`, leaving `"Hero"`. `"Hero 10"` → `Some('0')`,
/// leaving `"Hero 1"`: only one digit is ever considered.
fn split_trailing_digit(name: &mut String) -> Option<char> {
    let mut rev = name.chars().rev();
    let last = rev.next()?;
    let before = rev.next()?;
    if !last.is_ascii_digit() || !before.is_whitespace() {
        return None;
    }
    name.truncate(name.len() - last.len_utf8() - before.len_utf8());
    let trimmed = name.trim_end().len();
    name.truncate(trimmed);
    Some(last)
}

/// Make a name part safe to join: `" - "` only ever separates the tags, so
/// any inside a part becomes `_`, and a dangling `" -"` is dropped.
fn joinable(part: &str) -> String {
    let mut part = part.trim().to_string();
    while part.contains(" - ") {
        part = part.replace(" - ", "_");
    }
    while let Some(stripped) = part.strip_suffix(" -") {
        part = stripped.trim_end().to_string();
    }
    part
}

/// Rebuild a canonical folder name.
///
/// The result parses back to the same name: `"Hero - Armored - Alt"` composes
/// to `Hero_Armored_Alt`, not `Hero_Armored - Alt`.
pub fn compose_canonical_name(parsed: &ParsedModelName) -> String {
    let mut name = joinable(&parsed.character_name);
    if let Some(version) = parsed.model_version.as_deref().map(joinable) {
        if !version.is_empty() {
            name = format!("{}_{}", name, version);
        }
    }
    if let Some(digit) = parsed.version_digit {
        name = format!("{} {}", name, digit);
    }
    if !parsed.tags.is_empty() {
        name = format!("{} - {}", name, parsed.tags.join(" "));
    }
    name.trim().to_string()
}

/// The canonical path for a model folder: same parent, canonical basename.
pub fn rename_target(folder: &Path, keywords: &[TagKeyword]) -> Result<PathBuf, NameError> {
    let basename = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed = parse_model_folder_name(&basename, keywords)?;
    let canonical = compose_canonical_name(&parsed);
    Ok(match folder.parent() {
        Some(parent) => parent.join(canonical),
        None => PathBuf::from(canonical),
    })
}

/// Display fields read back from a canonical model folder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayName {
    pub character_name: String,
    pub model_name: String,
    pub tags: Vec<String>,
}

/// Read display fields from a (canonical) folder name.
///
/// - `"Hero_Armored 2 - Chibi NSFW"` → character `Hero`, model `Hero - Armored`,
///   tags `[Chibi, NSFW]`
/// - `"Hero 2"` → character `Hero`, model `Hero`, no tags
pub fn describe_model_name(basename: &str) -> Result<DisplayName, NameError> {
    let (name, tags) = match basename.split_once(" - ") {
        Some((name, rest)) => {
            let tags = rest
                .trim()
                .split(' ')
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            (name.trim().to_string(), tags)
        }
        None => (basename.to_string(), Vec::new()),
    };

    let mut name = name;
    let mut rev = name.chars().rev();
    if let (Some(last), Some(' ')) = (rev.next(), rev.next()) {
        if last.is_ascii_digit() {
            name.truncate(name.len() - last.len_utf8());
        }
    }

    let (character_name, model_name) = match name.split_once('_') {
        Some((character, model)) => {
            let character = character.trim().to_string();
            let model = format!("{} - {}", character, model.trim());
            (character, model)
        }
        None => {
            let character = name.trim().to_string();
            (character.clone(), character)
        }
    };

    if character_name.is_empty() {
        return Err(NameError::EmptyCharacterName(basename.to_string()));
    }

    Ok(DisplayName {
        character_name,
        model_name,
        tags,
    })
}

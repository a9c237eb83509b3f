use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Problem difficulty as reported by the metadata API.
///
/// Serialized with the API's capitalized spelling ("Easy", "Medium", "Hard");
/// the lowercase form is used for archive directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Error)]
#[error("unrecognized difficulty: {0}")]
pub struct DifficultyParseError(String);

impl Difficulty {
    /// Directory name for this difficulty ("easy", "medium", "hard").
    pub fn dir_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DifficultyParseError(other.to_string())),
        }
    }
}

/// Metadata for one problem, with `content` already normalized to the
/// canonical plain-text form (see leetsort-acquire::normalize).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Frontend problem id (e.g., "217"). Kept as a string — the API
    /// returns it as one and it is only ever used in filenames and headers.
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// Canonical plain-text problem description.
    pub content: String,
}

/// Provenance for a fetched record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchProvenance {
    pub url: String,
    pub slug: String,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// A fetched problem plus its provenance, as cached on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub source: FetchProvenance,
    pub details: ProblemDetails,
}

impl ProblemDetails {
    /// Canonical archive filename: `<id>-<slug>.<ext>`.
    pub fn canonical_filename(&self, slug: &str, ext: &str) -> String {
        format!("{}-{}.{}", self.id, slug, ext)
    }

    /// Render the docstring header injected at the top of a solution file.
    ///
    /// Layout is fixed: Title/Difficulty/Link/Language, an empty
    /// Complexity scaffold to fill in by hand, then the normalized content.
    pub fn header_block(&self, slug: &str, language: &str) -> String {
        format!(
            "\"\"\"\n\
             Title: {title} - {id}\n\
             Difficulty: {difficulty}\n\
             Link: https://leetcode.com/problems/{slug}/\n\
             Language: {language}\n\
             \n\
             Complexity:\n\
             Time - O()\n\
             Space - O()\n\
             \n\
             Content: {content}\n\
             \"\"\"\n\n\n",
            title = self.title,
            id = self.id,
            difficulty = self.difficulty,
            slug = slug,
            language = language,
            content = self.content,
        )
    }
}

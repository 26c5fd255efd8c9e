use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

// @module: RPG Maker document shapes, text units and structural paths

/// The three RPG Maker MV/MZ JSON shapes this tool understands
///
/// The shape is decided once from the filename and drives which walker runs.
/// Anything that is neither a map nor the common-event table is assumed to be
/// a flat database array (Actors, Items, Skills, States, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// MapXXX.json - events with pages of command lists
    Map,
    /// CommonEvents.json - a flat array of event records
    CommonEvents,
    /// Any other data table - a flat array of entity records
    Database,
}

impl DocumentKind {
    /// Detect the document shape from a filename
    pub fn detect(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.starts_with("map") {
            Self::Map
        } else if lower == "commonevents.json" {
            Self::CommonEvents
        } else {
            Self::Database
        }
    }
}

/// Category of an extracted text string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Dialogue,
    Choice,
    Name,
    Nickname,
    Profile,
    Description,
    Note,
    Message,
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Dialogue => "dialogue",
            Self::Choice => "choice",
            Self::Name => "name",
            Self::Nickname => "nickname",
            Self::Profile => "profile",
            Self::Description => "description",
            Self::Note => "note",
            Self::Message => "message",
        };
        write!(f, "{}", label)
    }
}

/// One step of a structural address into a JSON document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object field name
    Key(String),
    /// Array element index
    Index(usize),
}

/// A structural address locating one string field within a document
///
/// Built segment by segment during extraction and consumed directly by the
/// patcher, so an index is always an index and a key is always a key even
/// when the key happens to be numeric. The `Display`/`FromStr` round trip
/// exists for logs, previews and tests; the parsed form keeps the
/// digits-mean-index convention of the rendered syntax.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextPath(pub Vec<PathSegment>);

impl TextPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Extend this path with an object key
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(name.into()));
        self
    }

    /// Extend this path with an array index
    pub fn index(mut self, idx: usize) -> Self {
        self.0.push(PathSegment::Index(idx));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if pos > 0 {
                        write!(f, ".{}", name)?;
                    } else {
                        write!(f, "{}", name)?;
                    }
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromStr for TextPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(anyhow!("Empty path"));
        }

        let segments = s
            .split(['.', '[', ']'])
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<usize>() {
                Ok(idx) => PathSegment::Index(idx),
                Err(_) => PathSegment::Key(part.to_string()),
            })
            .collect();

        Ok(Self(segments))
    }
}

/// One translatable string extracted from a document
///
/// Immutable after extraction; its path must resolve on the exact document
/// it came from, and no two units from one extraction share a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextUnit {
    /// Category of the extracted string
    pub kind: TextKind,
    /// Structural address of the string in its source document
    pub path: TextPath,
    /// The string as found in the document
    pub original: String,
}

impl TextUnit {
    pub fn new(kind: TextKind, path: TextPath, original: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            original: original.into(),
        }
    }
}

/// A text unit paired with its translation
///
/// When the batch that carried the unit failed, `translated` holds the
/// original string so the pipeline stays fail-open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedUnit {
    /// The source unit
    pub unit: TextUnit,
    /// The translated string, or the original on fallback
    pub translated: String,
}

impl TranslatedUnit {
    pub fn new(unit: TextUnit, translated: impl Into<String>) -> Self {
        Self {
            unit,
            translated: translated.into(),
        }
    }

    /// Wrap a unit with its own original text as the translation
    pub fn identity(unit: TextUnit) -> Self {
        let translated = unit.original.clone();
        Self { unit, translated }
    }
}

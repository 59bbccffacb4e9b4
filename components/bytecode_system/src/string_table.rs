//! String table
//!
//! Maps the string ids referenced by RUN_LINE and ADD_OPTION to display
//! text and the line number the text came from in the source script.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;

use crate::error::LoadResult;

/// A single string table entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StringEntry {
    /// String id (`line:...`)
    pub id: String,
    /// Display text
    pub text: String,
    /// Line in the source script the text was compiled from
    pub line_number: Option<u32>,
    /// Source file name
    pub file: Option<String>,
    /// Node the line belongs to
    pub node: Option<String>,
    /// Line tags from the metadata table (without the leading `#`)
    pub metadata: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LineRow {
    id: String,
    text: String,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    node: Option<String>,
    #[serde(
        rename = "lineNumber",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    line_number: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MetadataRow {
    id: String,
    #[serde(default)]
    tags: String,
}

/// Immutable lookup from string id to entry
///
/// # Example
///
/// ```
/// use bytecode_system::StringTable;
///
/// let csv = "id,text,file,node,lineNumber\nline:1,Hello there.,story.yarn,Start,4\n";
/// let table = StringTable::from_csv(csv.as_bytes()).unwrap();
///
/// assert_eq!(table.text("line:1"), Some("Hello there."));
/// assert_eq!(table.line_number("line:1"), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StringTable {
    entries: HashMap<String, StringEntry>,
}

impl StringTable {
    /// Create an empty string table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>, line_number: Option<u32>) {
        let id = id.into();
        self.entries.insert(
            id.clone(),
            StringEntry {
                id,
                text: text.into(),
                line_number,
                ..StringEntry::default()
            },
        );
    }

    /// Builder form of [`StringTable::insert`]
    pub fn with_line(mut self, id: impl Into<String>, text: impl Into<String>, line_number: u32) -> Self {
        self.insert(id, text, Some(line_number));
        self
    }

    /// Read a lines table (`id,text,file,node,lineNumber`)
    ///
    /// Extra columns are ignored. A blank or non-numeric `lineNumber` is
    /// stored as absent.
    pub fn from_csv<R: io::Read>(reader: R) -> LoadResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in csv_reader.deserialize::<LineRow>() {
            let row = row?;
            entries.insert(
                row.id.clone(),
                StringEntry {
                    id: row.id,
                    text: row.text,
                    line_number: row.line_number,
                    file: row.file,
                    node: row.node,
                    metadata: Vec::new(),
                },
            );
        }
        Ok(Self { entries })
    }

    /// Read a lines table from disk
    pub fn from_csv_path(path: impl AsRef<std::path::Path>) -> LoadResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv(file)
    }

    /// Attach line tags from a metadata table (`id,node,lineNumber,tags`)
    ///
    /// Tags are space separated. Rows for ids missing from the table are
    /// ignored.
    pub fn merge_metadata_csv<R: io::Read>(&mut self, reader: R) -> LoadResult<()> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        for row in csv_reader.deserialize::<MetadataRow>() {
            let row = row?;
            if let Some(entry) = self.entries.get_mut(&row.id) {
                entry.metadata = row
                    .tags
                    .split_whitespace()
                    .map(|tag| tag.trim_start_matches('#').to_string())
                    .collect();
            }
        }
        Ok(())
    }

    /// Look up a full entry
    pub fn entry(&self, id: &str) -> Option<&StringEntry> {
        self.entries.get(id)
    }

    /// Display text for a string id
    pub fn text(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|e| e.text.as_str())
    }

    /// Source line number for a string id
    pub fn line_number(&self, id: &str) -> Option<u32> {
        self.entries.get(id).and_then(|e| e.line_number)
    }

    /// Line tags for a string id
    pub fn metadata(&self, id: &str) -> Option<&[String]> {
        self.entries.get(id).map(|e| e.metadata.as_slice())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

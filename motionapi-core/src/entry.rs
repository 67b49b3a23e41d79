//! Motion entry model and its document form
//!
//! Field names on the wire (JSON bodies and stored documents) are the
//! PascalCase names existing clients already send, with `_id` as the key.

use bson::oid::ObjectId;
use bson::{doc, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// One motion record in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Entry {
    /// 24 hex digit ObjectId string, assigned at construction
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub library: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub class_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub delta: String,
    #[serde(deserialize_with = "null_as_default")]
    pub interpolation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: String,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub code_sample: String,
    #[serde(with = "iso8601")]
    pub creation_date: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub edit_date: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub editor: String,
}

impl Entry {
    /// Create an empty entry with a fresh identifier, created and edited now.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: new_identifier(),
            name: String::new(),
            library: Vec::new(),
            class_name: String::new(),
            duration: String::new(),
            delta: String::new(),
            interpolation: String::new(),
            tags: String::new(),
            notes: String::new(),
            code_sample: String::new(),
            creation_date: now,
            edit_date: now,
            author: String::new(),
            editor: String::new(),
        }
    }

    /// Convert to the stored document layout.
    ///
    /// Pure and stable: the same entry always yields the same document, keys
    /// in the same order, timestamps as ISO-8601 strings.
    pub fn to_document(&self) -> Document {
        doc! {
            "_id": self.id.as_str(),
            "Name": self.name.as_str(),
            "Library": self.library.clone(),
            "ClassName": self.class_name.as_str(),
            "Duration": self.duration.as_str(),
            "Delta": self.delta.as_str(),
            "Interpolation": self.interpolation.as_str(),
            "Tags": self.tags.as_str(),
            "Notes": self.notes.as_str(),
            "CodeSample": self.code_sample.as_str(),
            "CreationDate": iso8601::format(&self.creation_date),
            "EditDate": iso8601::format(&self.edit_date),
            "Author": self.author.as_str(),
            "Editor": self.editor.as_str(),
        }
    }

    /// Decode a stored document using the driver's serde support.
    pub fn from_document(document: Document) -> Result<Self> {
        Ok(bson::from_document(document)?)
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh entry identifier
pub fn new_identifier() -> String {
    ObjectId::new().to_hex()
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// ISO-8601 timestamps in UTC with a `Z` suffix.
///
/// Sub-second digits are emitted only as far as needed, so parsing the
/// string back yields the same instant.
pub mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}

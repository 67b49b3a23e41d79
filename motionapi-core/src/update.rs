//! Field-level update built from a full entry
//!
//! Every field except `_id` and `CreationDate` is replaced. `EditDate` is
//! always the time the update was built, whatever the input carried.

use bson::{doc, Document};
use chrono::{DateTime, Utc};

use crate::entry::{iso8601, Entry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub name: String,
    pub library: Vec<String>,
    pub class_name: String,
    pub duration: String,
    pub delta: String,
    pub interpolation: String,
    pub tags: String,
    pub notes: String,
    pub code_sample: String,
    pub author: String,
    pub editor: String,
    pub edit_date: DateTime<Utc>,
}

impl EntryUpdate {
    /// Take the mutable fields of `entry`, stamped with `edited_at`.
    pub fn from_entry(entry: Entry, edited_at: DateTime<Utc>) -> Self {
        Self {
            name: entry.name,
            library: entry.library,
            class_name: entry.class_name,
            duration: entry.duration,
            delta: entry.delta,
            interpolation: entry.interpolation,
            tags: entry.tags,
            notes: entry.notes,
            code_sample: entry.code_sample,
            author: entry.author,
            editor: entry.editor,
            edit_date: edited_at,
        }
    }

    /// `$set` update document for the store.
    pub fn to_set_document(&self) -> Document {
        doc! {
            "$set": {
                "Name": self.name.as_str(),
                "Library": self.library.clone(),
                "ClassName": self.class_name.as_str(),
                "Duration": self.duration.as_str(),
                "Delta": self.delta.as_str(),
                "Interpolation": self.interpolation.as_str(),
                "Tags": self.tags.as_str(),
                "Notes": self.notes.as_str(),
                "CodeSample": self.code_sample.as_str(),
                "Author": self.author.as_str(),
                "Editor": self.editor.as_str(),
                "EditDate": iso8601::format(&self.edit_date),
            }
        }
    }

    /// Apply in place, leaving `id` and `creation_date` untouched.
    pub fn apply_to(&self, entry: &mut Entry) {
        entry.name.clone_from(&self.name);
        entry.library.clone_from(&self.library);
        entry.class_name.clone_from(&self.class_name);
        entry.duration.clone_from(&self.duration);
        entry.delta.clone_from(&self.delta);
        entry.interpolation.clone_from(&self.interpolation);
        entry.tags.clone_from(&self.tags);
        entry.notes.clone_from(&self.notes);
        entry.code_sample.clone_from(&self.code_sample);
        entry.author.clone_from(&self.author);
        entry.editor.clone_from(&self.editor);
        entry.edit_date = self.edit_date;
    }
}

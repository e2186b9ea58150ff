use chrono::{DateTime, Utc};

use crate::config::DisplayContext;
use crate::set::SetPrefix;
use crate::value::{Number, Value, ValueType};

/// Read-only shape of a value as consumed by templates.
///
/// Stored rows and values synthesized from project fields both end up here.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValueView {
    pub id: Option<i64>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub set_prefix: SetPrefix,
    pub set_index: i64,
    pub set_collection: Option<bool>,
    pub collection_index: i64,
    pub value_type: ValueType,
    pub unit: String,
    pub text: String,
    pub option_uri: Option<String>,
    pub option_text: Option<String>,
    pub option_additional_input: Option<bool>,
    pub external_id: String,
    pub value: String,
    pub value_and_unit: String,
    pub is_true: bool,
    pub is_false: bool,
    pub is_empty: bool,
    pub as_number: Number,
    #[serde(flatten)]
    pub file: Option<FileView>,
}

/// File fields, only present when the value holds a file.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FileView {
    pub file_name: String,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_path: Option<String>,
}

impl Value {
    pub fn to_view(&self, ctx: &DisplayContext<'_>) -> ValueView {
        let value = self.value(ctx.labels);
        let value_and_unit = self.value_and_unit(ctx.labels);
        let file = self.file.as_ref().map(|file| FileView {
            file_name: file.file_name(),
            file_url: self.id.map(|id| ctx.file_url_for(id)),
            file_type: file.file_type(),
            file_path: self.file_path(),
        });

        ValueView {
            id: self.id,
            created: self.created,
            updated: self.updated,
            set_prefix: self.set_prefix.clone(),
            set_index: self.set_index,
            set_collection: self.set_collection,
            collection_index: self.collection_index,
            value_type: self.value_type,
            unit: self.unit.clone(),
            text: self.text.clone(),
            option_uri: self.option_uri().map(str::to_string),
            option_text: self.option_text().map(str::to_string),
            option_additional_input: self.option_additional_input(),
            external_id: self.external_id.clone(),
            value,
            value_and_unit,
            is_true: self.is_true(),
            is_false: self.is_false(),
            is_empty: self.is_empty(),
            as_number: self.as_number(),
            file,
        }
    }
}

use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::Labels;
use crate::project::value_path;
use crate::set::{SetPosition, SetPrefix};

/// How the stored text of a value is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Url,
    Integer,
    Float,
    Boolean,
    Datetime,
    Email,
    Phone,
    Option,
    File,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "text",
            ValueType::Url => "url",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::Boolean => "boolean",
            ValueType::Datetime => "datetime",
            ValueType::Email => "email",
            ValueType::Phone => "phone",
            ValueType::Option => "option",
            ValueType::File => "file",
        };
        f.write_str(name)
    }
}

/// Abstract, project independent question definition. Identified by URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Attribute {
    pub uri: String,
}

impl Attribute {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Predefined answer chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerOption {
    pub uri: String,
    pub text: String,
    /// Text shown in views instead of `text`, may be empty.
    #[serde(default)]
    pub view_text: String,
    /// The option accepts free text next to it (e.g. "Other: ...").
    #[serde(default)]
    pub additional_input: bool,
}

/// Uploaded file, referenced by its storage name
/// (`projects/<project>/values/<value>/<file name>`).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FileRef {
    pub name: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Last path component of the storage name.
    pub fn file_name(&self) -> String {
        Path::new(&self.name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Mime type guessed from the extension.
    pub fn file_type(&self) -> Option<String> {
        mime_guess::from_path(&self.name).first().map(|m| m.to_string())
    }
}

/// Result of numeric coercion, keeps integers and floats apart.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl Number {
    /// Coerce text to a number.
    ///
    /// Accepts a decimal comma. Tries an integer first, then a float;
    /// anything else is `0`.
    pub fn parse(text: &str) -> Self {
        let normalized = text.replace(',', ".");
        let trimmed = normalized.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Number::Int(i);
        }
        match trimmed.parse::<f64>() {
            Ok(f) => Number::Float(f),
            Err(_) => Number::Int(0),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// The part of a value that is displayed, chosen by precedence
/// option > file > text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    Option {
        option: &'a AnswerOption,
        /// Free text captured next to the option.
        text: &'a str,
    },
    File(&'a FileRef),
    Text {
        value_type: ValueType,
        text: &'a str,
    },
    Empty,
}

impl Payload<'_> {
    /// Display form used by `Value::value`.
    pub fn display(&self, labels: &Labels) -> String {
        match self {
            Payload::Option { option, text } => option_display(option, text, false),
            Payload::File(file) => file.file_name(),
            Payload::Text { value_type, text } => text_display(*value_type, text, labels),
            Payload::Empty => String::new(),
        }
    }

    /// Label form used by `Value::label`. Differs from `display` only for options.
    pub fn label(&self, labels: &Labels) -> String {
        match self {
            Payload::Option { option, text } => option_display(option, text, true),
            other => other.display(labels),
        }
    }
}

fn option_display(option: &AnswerOption, text: &str, view: bool) -> String {
    let (preferred, fallback) = if view {
        (&option.view_text, &option.text)
    } else {
        (&option.text, &option.view_text)
    };
    let mut string = if preferred.is_empty() {
        fallback.clone()
    } else {
        preferred.clone()
    };
    if option.additional_input && !text.is_empty() {
        string.push_str(": ");
        string.push_str(text);
    }
    string
}

/// Decode stored text according to its value type.
///
/// Datetimes render as their date; unparsable datetimes are returned as-is.
pub fn text_display(value_type: ValueType, text: &str, labels: &Labels) -> String {
    match value_type {
        ValueType::Datetime => match parse_iso_date(text) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => text.to_string(),
        },
        ValueType::Boolean => {
            if text == "1" {
                labels.yes.clone()
            } else {
                labels.no.clone()
            }
        }
        _ => text.to_string(),
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Date part of an ISO 8601 date or datetime, in the datetime's own offset.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt.date_naive());
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// One answer entered by a user into a project, at a position inside
/// (possibly nested) sets and collections.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Value {
    /// `None` until saved, and for values synthesized from project fields.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,

    pub project: i64,
    #[serde(default)]
    pub snapshot: Option<i64>,
    /// `None` once the attribute was deleted; the value is kept as history.
    #[serde(default)]
    pub attribute: Option<Attribute>,

    #[serde(default)]
    pub set_prefix: SetPrefix,
    #[serde(default)]
    pub set_index: i64,
    /// Entered as part of a set tagged as collection.
    #[serde(default)]
    pub set_collection: Option<bool>,
    #[serde(default)]
    pub collection_index: i64,

    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub option: Option<AnswerOption>,
    /// Exports write a missing file as `""`.
    #[serde(default, deserialize_with = "deserialize_file")]
    pub file: Option<FileRef>,
    #[serde(default)]
    pub value_type: ValueType,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub external_id: String,
}

fn deserialize_file<'de, D>(deserializer: D) -> Result<Option<FileRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let file = <Option<FileRef> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(file.filter(|f| !f.name.is_empty()))
}

impl Value {
    /// Text that counts as "false". A missing text is stored as `""`.
    pub const FALSE_TEXT: [&'static str; 6] = ["", "0", "f", "F", "false", "False"];

    pub fn new(project: i64) -> Self {
        Self {
            project,
            ..Self::default()
        }
    }

    /// Unsaved value holding a computed field, never written to storage.
    pub fn ephemeral(project: i64, text: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            project,
            text: text.into(),
            value_type,
            ..Self::default()
        }
    }

    pub fn position(&self) -> SetPosition {
        SetPosition::new(self.set_prefix.clone(), self.set_index)
    }

    pub fn payload(&self) -> Payload<'_> {
        if let Some(option) = &self.option {
            Payload::Option { option, text: &self.text }
        } else if let Some(file) = &self.file {
            Payload::File(file)
        } else if !self.text.is_empty() {
            Payload::Text { value_type: self.value_type, text: &self.text }
        } else {
            Payload::Empty
        }
    }

    pub fn value(&self, labels: &Labels) -> String {
        self.payload().display(labels)
    }

    pub fn label(&self, labels: &Labels) -> String {
        self.payload().label(labels)
    }

    pub fn value_and_unit(&self, labels: &Labels) -> String {
        let value = self.value(labels);
        if self.unit.is_empty() {
            value
        } else {
            format!("{value} {}", self.unit)
        }
    }

    fn text_is_false(&self) -> bool {
        Self::FALSE_TEXT.contains(&self.text.as_str())
    }

    pub fn is_true(&self) -> bool {
        !self.text_is_false()
            || self.option.is_some()
            || self.file.is_some()
            || !self.external_id.is_empty()
    }

    pub fn is_false(&self) -> bool {
        self.text_is_false()
            && self.option.is_none()
            && self.file.is_none()
            && self.external_id.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.option.is_none()
            && self.file.is_none()
            && self.external_id.is_empty()
    }

    pub fn as_number(&self) -> Number {
        Number::parse(&self.text)
    }

    pub fn attribute_uri(&self) -> Option<&str> {
        self.attribute.as_ref().map(|a| a.uri.as_str())
    }

    pub fn option_uri(&self) -> Option<&str> {
        self.option.as_ref().map(|o| o.uri.as_str())
    }

    pub fn option_text(&self) -> Option<&str> {
        self.option.as_ref().map(|o| o.text.as_str())
    }

    pub fn option_additional_input(&self) -> Option<bool> {
        self.option.as_ref().map(|o| o.additional_input)
    }

    pub fn file_name(&self) -> Option<String> {
        self.file.as_ref().map(FileRef::file_name)
    }

    pub fn file_type(&self) -> Option<String> {
        self.file.as_ref().and_then(FileRef::file_type)
    }

    /// File name relative to the value directory of the project (or snapshot).
    pub fn file_path(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        let root = value_path(self.project, self.snapshot);
        let relative = Path::new(&file.name).strip_prefix(&root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.snapshot {
            Some(snapshot) => write!(f, "{} / {snapshot}", self.project)?,
            None => write!(f, "{} / -", self.project)?,
        }
        write!(f, " / {} / {} / {}", self.set_prefix, self.set_index, self.collection_index)
    }
}

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::value::ValueType;

/// A research data management project.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Frozen copy of a project's values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub id: i64,
    pub project: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Fields that projects and snapshots expose to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Id,
    Title,
    Description,
    Created,
    Updated,
}

impl ProjectField {
    /// Type the field is rendered with.
    pub fn value_type(self) -> ValueType {
        match self {
            ProjectField::Id => ValueType::Integer,
            ProjectField::Title | ProjectField::Description => ValueType::Text,
            ProjectField::Created | ProjectField::Updated => ValueType::Datetime,
        }
    }
}

impl Project {
    /// Stored text of a computed field. Datetimes use RFC 3339.
    pub fn field_text(&self, field: ProjectField) -> String {
        field_text(field, self.id, &self.title, &self.description, self.created, self.updated)
    }
}

impl Snapshot {
    pub fn field_text(&self, field: ProjectField) -> String {
        field_text(field, self.id, &self.title, &self.description, self.created, self.updated)
    }
}

fn field_text(
    field: ProjectField,
    id: i64,
    title: &str,
    description: &str,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
) -> String {
    match field {
        ProjectField::Id => id.to_string(),
        ProjectField::Title => title.to_string(),
        ProjectField::Description => description.to_string(),
        ProjectField::Created => created.to_rfc3339(),
        ProjectField::Updated => updated.to_rfc3339(),
    }
}

/// Directory that holds uploaded value files.
///
/// `projects/<project>/values` or `projects/<project>/snapshots/<snapshot>/values`.
pub fn value_path(project: i64, snapshot: Option<i64>) -> PathBuf {
    let base = PathBuf::from("projects").join(project.to_string());
    match snapshot {
        None => base.join("values"),
        Some(snapshot) => base.join("snapshots").join(snapshot.to_string()).join("values"),
    }
}

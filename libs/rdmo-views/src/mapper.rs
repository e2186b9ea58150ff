use rdmo_api::{Project, ProjectField, Snapshot, Value};

use crate::error::ViewError;

/// Project a template is rendered for, optionally frozen in a snapshot.
///
/// With a snapshot, stored lookups read the snapshot's values.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContext {
    pub project: Project,
    pub snapshot: Option<Snapshot>,
}

impl ProjectContext {
    pub fn new(project: Project) -> Self {
        Self { project, snapshot: None }
    }

    pub fn with_snapshot(project: Project, snapshot: Snapshot) -> Self {
        Self { project, snapshot: Some(snapshot) }
    }

    pub fn snapshot_id(&self) -> Option<i64> {
        self.snapshot.as_ref().map(|s| s.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Project,
    Snapshot,
}

/// Attribute paths answered from project fields instead of stored values.
const ATTRIBUTE_VALUE_MAPPER: [(&str, Source, ProjectField); 10] = [
    ("project/id", Source::Project, ProjectField::Id),
    ("project/title", Source::Project, ProjectField::Title),
    ("project/description", Source::Project, ProjectField::Description),
    ("project/created", Source::Project, ProjectField::Created),
    ("project/updated", Source::Project, ProjectField::Updated),
    ("project/snapshot/id", Source::Snapshot, ProjectField::Id),
    ("project/snapshot/title", Source::Snapshot, ProjectField::Title),
    ("project/snapshot/description", Source::Snapshot, ProjectField::Description),
    ("project/snapshot/created", Source::Snapshot, ProjectField::Created),
    ("project/snapshot/updated", Source::Snapshot, ProjectField::Updated),
];

fn lookup(attribute: &str) -> Option<(Source, ProjectField)> {
    ATTRIBUTE_VALUE_MAPPER
        .iter()
        .find(|(path, _, _)| *path == attribute)
        .map(|(_, source, field)| (*source, *field))
}

/// Whether `attribute` is answered from project fields.
pub fn is_mapped(attribute: &str) -> bool {
    lookup(attribute).is_some()
}

/// Synthesize an unsaved value from a project (or snapshot) field.
///
/// Snapshot paths on a context without snapshot yield an empty text.
pub fn mapped_value(attribute: &str, context: &ProjectContext) -> Result<Value, ViewError> {
    let (source, field) =
        lookup(attribute).ok_or_else(|| ViewError::UnsupportedAttribute(attribute.to_string()))?;

    let text = match source {
        Source::Project => context.project.field_text(field),
        Source::Snapshot => context
            .snapshot
            .as_ref()
            .map(|s| s.field_text(field))
            .unwrap_or_default(),
    };
    Ok(Value::ephemeral(context.project.id, text, field.value_type()))
}

use serde::Deserialize;

use rdmo_api::{Coord, SetPosition};

use crate::error::ViewError;
use crate::resolver::{Coords, ValueResolver};

/// Ancestor of a catalog element (page, question set).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Ancestor {
    /// Repeatable set ("collection"), labeled in breadcrumbs.
    #[serde(default)]
    pub is_collection: bool,
    /// Attribute whose value names each set.
    #[serde(default)]
    pub attribute: Option<String>,
    #[serde(default)]
    pub verbose_name: String,
}

/// Catalog element as far as labels are concerned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Element {
    /// Innermost ancestor first.
    #[serde(default)]
    pub ancestors: Vec<Ancestor>,
}

impl ValueResolver<'_> {
    /// Breadcrumb labels of the sets `position` is nested in, outermost first.
    ///
    /// One label per collection ancestor: `"<Name> #<n>"`, or
    /// `"<Name> \"<value>\""` when the ancestor's attribute has a value
    /// for that set.
    pub fn get_labels(&self, element: &Element, position: &SetPosition) -> Result<Vec<String>, ViewError> {
        let mut position = position.clone();
        let mut set_labels = Vec::new();

        for ancestor in element.ancestors.iter().filter(|a| a.is_collection) {
            let mut set_label = format!("#{}", position.set_index + 1);

            if let Some(attribute) = ancestor.attribute.as_deref().filter(|a| !a.is_empty()) {
                let coords = Coords::first()
                    .set_prefix(Coord::Exact(position.set_prefix.clone()))
                    .set_index(Coord::Exact(position.set_index));
                if let Some(value) = self.get_value(attribute, &coords)? {
                    set_label = format!("\"{}\"", value.value);
                }
            }

            let name = title_case(&ancestor.verbose_name);
            let name = if name.is_empty() { self.config().labels.set.clone() } else { name };
            set_labels.push(format!("{name} {set_label}"));

            if let Some(parent) = position.parent() {
                position = parent;
            }
        }

        set_labels.reverse();
        Ok(set_labels)
    }
}

/// Uppercase the first letter of every word, lowercase the rest.
///
/// A word is a run of cased letters. Any character that is neither
/// upper- nor lowercase ends it.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_lowercase() || c.is_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rdmo_api::{Attribute, Project, SetPrefix, Value};
    use storage_memory::MemoryStorage;

    use super::*;
    use crate::config::ViewConfig;
    use crate::mapper::ProjectContext;

    const STUDY_NAME: &str = "http://example.com/terms/domain/project/study/name";

    fn context() -> ProjectContext {
        ProjectContext::new(Project {
            id: 1,
            title: "Cohort".to_string(),
            description: String::new(),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    fn ancestor(verbose_name: &str, is_collection: bool, attribute: Option<&str>) -> Ancestor {
        Ancestor {
            is_collection,
            attribute: attribute.map(str::to_string),
            verbose_name: verbose_name.to_string(),
        }
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("data set"), "Data Set");
        assert_eq!(title_case("wORK pACKAGE"), "Work Package");
        assert_eq!(title_case("sub-study 2b"), "Sub-Study 2B");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_restarts_after_uncased_letters() {
        assert_eq!(title_case("数据set"), "数据Set");
        assert_eq!(title_case("プロジェクトplan b"), "プロジェクトPlan B");
        assert_eq!(title_case("ÉTUDE élève"), "Étude Élève");
    }

    #[test]
    fn nested_collections_fall_back_to_positions() {
        let storage = MemoryStorage::new();
        let ctx = context();
        let config = ViewConfig::default();
        let resolver = ValueResolver::new(&storage, &ctx, &config);

        let element = Element {
            ancestors: vec![
                ancestor("sample", true, None),
                ancestor("study", true, None),
            ],
        };
        let position = SetPosition::new("1".parse().unwrap(), 2);

        let labels = resolver.get_labels(&element, &position).unwrap();
        assert_eq!(labels, ["Study #2", "Sample #3"]);
    }

    #[test]
    fn labeling_attribute_value_is_quoted() {
        let storage = MemoryStorage::with_values([Value {
            attribute: Some(Attribute::new(STUDY_NAME)),
            set_index: 1,
            text: "Baseline".to_string(),
            ..Value::new(1)
        }])
        .unwrap();
        let ctx = context();
        let config = ViewConfig::default();
        let resolver = ValueResolver::new(&storage, &ctx, &config);

        let element = Element {
            ancestors: vec![
                ancestor("sample", true, Some("http://example.com/terms/domain/project/sample/name")),
                ancestor("page", false, None),
                ancestor("study", true, Some(STUDY_NAME)),
            ],
        };
        let position = SetPosition::new("1".parse().unwrap(), 0);

        let labels = resolver.get_labels(&element, &position).unwrap();
        assert_eq!(labels, ["Study \"Baseline\"", "Sample #1"]);
    }

    #[test]
    fn missing_name_uses_set_label() {
        let storage = MemoryStorage::new();
        let ctx = context();
        let mut config = ViewConfig::default();
        config.labels.set = "Satz".to_string();
        let resolver = ValueResolver::new(&storage, &ctx, &config);

        let element = Element { ancestors: vec![ancestor("", true, Some(""))] };
        let labels = resolver.get_labels(&element, &SetPosition::default()).unwrap();
        assert_eq!(labels, ["Satz #1"]);
    }

    #[test]
    fn top_level_keeps_index_once_prefix_is_exhausted() {
        let storage = MemoryStorage::new();
        let ctx = context();
        let config = ViewConfig::default();
        let resolver = ValueResolver::new(&storage, &ctx, &config);

        let element = Element {
            ancestors: vec![
                ancestor("c", true, None),
                ancestor("b", true, None),
                ancestor("a", true, None),
            ],
        };
        let position = SetPosition::new(SetPrefix::root(), 4);
        let labels = resolver.get_labels(&element, &position).unwrap();
        assert_eq!(labels, ["A #5", "B #5", "C #5"]);
    }

    #[test]
    fn element_deserializes() {
        let element: Element = serde_json::from_str(
            r#"{"ancestors": [{"is_collection": true, "attribute": null, "verbose_name": "dataset"}, {}]}"#,
        )
        .unwrap();
        assert_eq!(element.ancestors.len(), 2);
        assert!(!element.ancestors[1].is_collection);
    }
}

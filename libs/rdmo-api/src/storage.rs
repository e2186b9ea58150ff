use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::StorageError;
use crate::set::SetPrefix;
use crate::value::Value;

/// Filter on one positional axis. `*` in template arguments means `Any`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Coord<T> {
    #[default]
    Any,
    Exact(T),
}

impl<T: PartialEq> Coord<T> {
    pub fn matches(&self, candidate: &T) -> bool {
        match self {
            Coord::Any => true,
            Coord::Exact(expected) => expected == candidate,
        }
    }
}

impl<T> From<T> for Coord<T> {
    fn from(value: T) -> Self {
        Coord::Exact(value)
    }
}

impl<T: FromStr> FromStr for Coord<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            Ok(Coord::Any)
        } else {
            s.parse().map(Coord::Exact)
        }
    }
}

/// Parameters of a value lookup.
///
/// A project's current values live under `snapshot = None`; frozen values
/// under the snapshot id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueQuery {
    pub project: i64,
    pub snapshot: Option<i64>,
    /// Attribute URI. `None` matches every attribute, including orphaned values.
    pub attribute: Option<String>,
    pub set_prefix: Coord<SetPrefix>,
    pub set_index: Coord<i64>,
    pub collection_index: Coord<i64>,
}

impl ValueQuery {
    pub fn new(project: i64, snapshot: Option<i64>) -> Self {
        Self {
            project,
            snapshot,
            attribute: None,
            set_prefix: Coord::Any,
            set_index: Coord::Any,
            collection_index: Coord::Any,
        }
    }

    pub fn attribute(mut self, uri: impl Into<String>) -> Self {
        self.attribute = Some(uri.into());
        self
    }

    pub fn set_prefix(mut self, set_prefix: Coord<SetPrefix>) -> Self {
        self.set_prefix = set_prefix;
        self
    }

    pub fn set_index(mut self, set_index: Coord<i64>) -> Self {
        self.set_index = set_index;
        self
    }

    pub fn collection_index(mut self, collection_index: Coord<i64>) -> Self {
        self.collection_index = collection_index;
        self
    }

    pub fn matches(&self, value: &Value) -> bool {
        if value.project != self.project || value.snapshot != self.snapshot {
            return false;
        }
        if let Some(uri) = &self.attribute {
            if value.attribute_uri() != Some(uri.as_str()) {
                return false;
            }
        }
        self.set_prefix.matches(&value.set_prefix)
            && self.set_index.matches(&value.set_index)
            && self.collection_index.matches(&value.collection_index)
    }
}

/// Canonical order of values:
/// (project, snapshot, attribute, set_prefix, set_index, collection_index).
///
/// `set_prefix` compares as stored text, so `"10"` sorts before `"2"`.
/// Positional "first match" lookups depend on this order.
pub fn storage_order(a: &Value, b: &Value) -> Ordering {
    a.project
        .cmp(&b.project)
        .then_with(|| a.snapshot.cmp(&b.snapshot))
        .then_with(|| a.attribute_uri().cmp(&b.attribute_uri()))
        .then_with(|| a.set_prefix.to_string().cmp(&b.set_prefix.to_string()))
        .then_with(|| a.set_index.cmp(&b.set_index))
        .then_with(|| a.collection_index.cmp(&b.collection_index))
}

/// Value storage backend.
///
/// Lookups are read-only and return values in `storage_order`.
/// Writes are last-write-wins.
pub trait ValueStorage: Send + Sync {
    /// Insert (no `id`) or replace (existing `id`) a value. Returns the stored row.
    fn save(&self, value: Value) -> Result<Value, StorageError>;

    /// Values matching the query, in `storage_order`.
    fn query(&self, query: &ValueQuery) -> Result<Vec<Value>, StorageError>;

    /// Delete one value. `false` if it did not exist.
    fn delete(&self, id: i64) -> Result<bool, StorageError>;

    /// Cascade: delete every value of a project, snapshots included.
    fn delete_project(&self, project: i64) -> Result<usize, StorageError>;

    /// Cascade: delete every value frozen in a snapshot.
    fn delete_snapshot(&self, snapshot: i64) -> Result<usize, StorageError>;

    /// The attribute was deleted: unset it, keep the values.
    fn detach_attribute(&self, uri: &str) -> Result<usize, StorageError>;

    /// The option was deleted: unset it, keep the values.
    fn detach_option(&self, uri: &str) -> Result<usize, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Attribute;

    fn value(attribute: &str, set_prefix: &str, set_index: i64, collection_index: i64) -> Value {
        Value {
            attribute: Some(Attribute::new(attribute)),
            set_prefix: set_prefix.parse().unwrap(),
            set_index,
            collection_index,
            ..Value::new(1)
        }
    }

    #[test]
    fn coord_parses_wildcard() {
        assert_eq!("*".parse::<Coord<i64>>().unwrap(), Coord::Any);
        assert_eq!("3".parse::<Coord<i64>>().unwrap(), Coord::Exact(3));
        assert_eq!(
            "1|2".parse::<Coord<SetPrefix>>().unwrap(),
            Coord::Exact(SetPrefix::from_segments(vec![1, 2]))
        );
        assert!("x".parse::<Coord<i64>>().is_err());
    }

    #[test]
    fn query_filters_each_axis() {
        let v = value("a", "0", 1, 2);
        assert!(ValueQuery::new(1, None).matches(&v));
        assert!(ValueQuery::new(1, None).attribute("a").set_index(Coord::Exact(1)).matches(&v));
        assert!(!ValueQuery::new(1, None).attribute("b").matches(&v));
        assert!(!ValueQuery::new(1, Some(3)).matches(&v));
        assert!(!ValueQuery::new(2, None).matches(&v));
        assert!(!ValueQuery::new(1, None).set_prefix(SetPrefix::root().into()).matches(&v));
        assert!(!ValueQuery::new(1, None).collection_index(Coord::Exact(0)).matches(&v));
    }

    #[test]
    fn orphaned_values_never_match_an_attribute() {
        let orphan = Value { attribute: None, ..value("a", "", 0, 0) };
        assert!(!ValueQuery::new(1, None).attribute("a").matches(&orphan));
        assert!(ValueQuery::new(1, None).matches(&orphan));
    }

    #[test]
    fn order_compares_prefix_as_text() {
        let mut values = vec![
            value("b", "", 0, 0),
            value("a", "2", 0, 0),
            value("a", "10", 0, 0),
            value("a", "", 1, 0),
            value("a", "", 0, 1),
            value("a", "", 0, 0),
        ];
        values.sort_by(storage_order);
        let keys: Vec<_> = values
            .iter()
            .map(|v| (v.attribute_uri().unwrap(), v.set_prefix.to_string(), v.set_index, v.collection_index))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a", String::new(), 0, 0),
                ("a", String::new(), 0, 1),
                ("a", String::new(), 1, 0),
                ("a", "10".to_string(), 0, 0),
                ("a", "2".to_string(), 0, 0),
                ("b", String::new(), 0, 0),
            ]
        );
    }
}

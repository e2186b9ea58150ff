use std::collections::BTreeSet;

use rdmo_api::{Coord, Number, SetPrefix, ValueQuery, ValueStorage, ValueView};

use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::mapper::{self, ProjectContext};

/// Positional coordinates of a lookup. `Coord::Any` is the template `'*'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coords {
    pub set_prefix: Coord<SetPrefix>,
    pub set_index: Coord<i64>,
    /// Position in a collection (`collection_index`).
    pub index: Coord<i64>,
}

impl Coords {
    /// Every position: defaults of the multi-value lookups.
    pub fn any() -> Self {
        Self {
            set_prefix: Coord::Any,
            set_index: Coord::Any,
            index: Coord::Any,
        }
    }

    /// The first position (`''`, `0`, `0`): defaults of the single-value lookups.
    pub fn first() -> Self {
        Self {
            set_prefix: Coord::Exact(SetPrefix::root()),
            set_index: Coord::Exact(0),
            index: Coord::Exact(0),
        }
    }

    pub fn set_prefix(mut self, set_prefix: Coord<SetPrefix>) -> Self {
        self.set_prefix = set_prefix;
        self
    }

    pub fn set_index(mut self, set_index: Coord<i64>) -> Self {
        self.set_index = set_index;
        self
    }

    pub fn index(mut self, index: Coord<i64>) -> Self {
        self.index = index;
        self
    }
}

/// Path based value lookup for one project, the template tag layer.
///
/// Read-only: every call is an independent query against `storage`.
pub struct ValueResolver<'a> {
    storage: &'a dyn ValueStorage,
    context: &'a ProjectContext,
    config: &'a ViewConfig,
}

impl<'a> ValueResolver<'a> {
    pub fn new(
        storage: &'a dyn ValueStorage,
        context: &'a ProjectContext,
        config: &'a ViewConfig,
    ) -> Self {
        Self { storage, context, config }
    }

    /// Same storage and config, different project.
    pub fn for_project(&self, context: &'a ProjectContext) -> Self {
        Self { storage: self.storage, context, config: self.config }
    }

    pub fn context(&self) -> &ProjectContext {
        self.context
    }

    pub fn config(&self) -> &ViewConfig {
        self.config
    }

    /// Values for an attribute path.
    ///
    /// Computed project fields win over stored values and ignore `coords`.
    pub fn get_values(&self, attribute: &str, coords: &Coords) -> Result<Vec<ValueView>, ViewError> {
        let display = self.config.display();

        if mapper::is_mapped(attribute) {
            tracing::debug!(attribute, "resolved from project fields");
            let value = mapper::mapped_value(attribute, self.context)?;
            return Ok(vec![value.to_view(&display)]);
        }

        let query = ValueQuery::new(self.context.project.id, self.context.snapshot_id())
            .attribute(attribute)
            .set_prefix(coords.set_prefix.clone())
            .set_index(coords.set_index.clone())
            .collection_index(coords.index.clone());
        let values = self
            .storage
            .query(&query)
            .map_err(|e| ViewError::from(e).with_context(attribute))?;
        tracing::debug!(attribute, count = values.len(), "resolved from stored values");

        Ok(values.iter().map(|v| v.to_view(&display)).collect())
    }

    /// First value at `coords`, `None` if there is none.
    pub fn get_value(&self, attribute: &str, coords: &Coords) -> Result<Option<ValueView>, ViewError> {
        Ok(self.get_values(attribute, coords)?.into_iter().next())
    }

    pub fn get_numbers(&self, attribute: &str, coords: &Coords) -> Result<Vec<Number>, ViewError> {
        Ok(self
            .get_values(attribute, coords)?
            .into_iter()
            .map(|v| v.as_number)
            .collect())
    }

    /// Number of the first value at `coords`, `0` if there is none.
    pub fn get_number(&self, attribute: &str, coords: &Coords) -> Result<Number, ViewError> {
        Ok(self
            .get_value(attribute, coords)?
            .map(|v| v.as_number)
            .unwrap_or_default())
    }

    /// Values of `attribute` inside `set` (a value returned by `get_sets`).
    ///
    /// `index` selects the collection position, `'*'` for all of them.
    pub fn get_set_values(
        &self,
        set: &ValueView,
        attribute: &str,
        set_prefix: &SetPrefix,
        index: Coord<i64>,
    ) -> Result<Vec<ValueView>, ViewError> {
        let coords = Coords::any()
            .set_prefix(Coord::Exact(set_prefix.clone()))
            .set_index(Coord::Exact(set.set_index))
            .index(index);
        self.get_values(attribute, &coords)
    }

    pub fn get_set_value(
        &self,
        set: &ValueView,
        attribute: &str,
        set_prefix: &SetPrefix,
        index: i64,
    ) -> Result<Option<ValueView>, ViewError> {
        let coords = Coords::first()
            .set_prefix(Coord::Exact(set_prefix.clone()))
            .set_index(Coord::Exact(set.set_index))
            .index(Coord::Exact(index));
        self.get_value(attribute, &coords)
    }

    /// Distinct set prefixes used by `attribute`, sorted as text.
    ///
    /// `None` if the lookup failed.
    pub fn get_set_prefixes(&self, attribute: &str) -> Option<Vec<String>> {
        match self.get_values(attribute, &Coords::any()) {
            Ok(values) => {
                let prefixes: BTreeSet<String> =
                    values.iter().map(|v| v.set_prefix.to_string()).collect();
                Some(prefixes.into_iter().collect())
            }
            Err(e) => {
                tracing::warn!(attribute, error = %e, "set prefix lookup failed");
                None
            }
        }
    }

    /// Distinct set indexes used by `attribute` below `set_prefix`, sorted.
    ///
    /// `None` if the lookup failed.
    pub fn get_set_indexes(&self, attribute: &str, set_prefix: Coord<SetPrefix>) -> Option<Vec<i64>> {
        match self.get_values(attribute, &Coords::any().set_prefix(set_prefix)) {
            Ok(values) => {
                let indexes: BTreeSet<i64> = values.iter().map(|v| v.set_index).collect();
                Some(indexes.into_iter().collect())
            }
            Err(e) => {
                tracing::warn!(attribute, error = %e, "set index lookup failed");
                None
            }
        }
    }

    /// The sets below `set_prefix`, one value per set.
    ///
    /// Older catalogs label sets with `<attribute>/id`: when nothing is
    /// found the lookup is retried with `/id` appended.
    pub fn get_sets(&self, attribute: &str, set_prefix: &SetPrefix) -> Result<Vec<ValueView>, ViewError> {
        let path = attribute.trim_end_matches('/');
        let coords = Coords::any()
            .set_prefix(Coord::Exact(set_prefix.clone()))
            .index(Coord::Exact(0));
        let values = self.get_values(path, &coords)?;
        if !values.is_empty() || attribute.ends_with("/id") {
            return Ok(values);
        }

        let fallback = format!("{path}/id");
        tracing::debug!(attribute, fallback = %fallback, "no sets found, retrying with /id");
        self.get_sets(&fallback, set_prefix)
    }

    /// Alias of `get_sets`.
    pub fn get_set(&self, attribute: &str, set_prefix: &SetPrefix) -> Result<Vec<ValueView>, ViewError> {
        self.get_sets(attribute, set_prefix)
    }
}

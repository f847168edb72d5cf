use std::collections::HashMap;

use crate::{
    types::{Fields, Value},
    util::{Result, Status},
};

/// All the family writes for one primary key, applied as a single step.
///
/// A mutation never spans keys. Each family appears at most once: a second
/// `put` to the same family replaces the fields given earlier.
#[derive(Debug, Clone)]
pub struct RowMutation {
    /// Primary key shared by every put
    key: String,
    /// (family name, fields) in first-put order
    ops: Vec<(String, Fields)>,
    /// family name -> index into `ops`
    index: HashMap<String, usize>,
}

impl RowMutation {
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        RowMutation {
            key: key.into(),
            ops: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add the fields to write into `family`
    pub fn put(mut self, family: impl Into<String>, fields: Fields) -> Self {
        self.put_mut(family, fields);
        self
    }

    pub fn put_mut(&mut self, family: impl Into<String>, fields: Fields) {
        let family = family.into();
        match self.index.get(&family) {
            Some(&idx) => self.ops[idx].1 = fields,
            None => {
                self.index.insert(family.clone(), self.ops.len());
                self.ops.push((family, fields));
            },
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fields queued for `family`, if any
    pub fn get(&self, family: &str) -> Option<&Fields> {
        self.index.get(family).map(|&idx| &self.ops[idx].1)
    }

    /// Families touched, in first-put order
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().map(|(f, _)| f.as_str())
    }

    #[inline]
    pub fn ops(&self) -> &[(String, Fields)] {
        &self.ops
    }

    /// Number of families touched
    #[inline]
    pub fn count(&self) -> usize {
        self.ops.len()
    }

    /// Total number of cells across all families
    pub fn cell_count(&self) -> usize {
        self.ops.iter().map(|(_, f)| f.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Build a mutation from a JSON document of the form
    /// `{"family": {"column": scalar, ...}, ...}`.
    ///
    /// Strings become `Value::Str`, integral numbers `Value::Int` and other
    /// numbers `Value::Float`. Any other shape is rejected.
    pub fn from_json(key: impl Into<String>, doc: &serde_json::Value) -> Result<Self> {
        let families = doc
            .as_object()
            .ok_or_else(|| Status::invalid_argument("Expected an object of column families"))?;

        let mut mutation = RowMutation::new(key);
        for (family, columns) in families {
            let columns = columns.as_object().ok_or_else(|| {
                Status::invalid_argument(format!("Family '{}' must map to an object", family))
            })?;

            let mut fields = Fields::with_capacity(columns.len());
            for (column, value) in columns {
                fields.insert(column.clone(), json_scalar(family, column, value)?);
            }
            mutation.put_mut(family.clone(), fields);
        }

        Ok(mutation)
    }

    pub(crate) fn into_parts(self) -> (String, Vec<(String, Fields)>) {
        (self.key, self.ops)
    }
}

fn json_scalar(family: &str, column: &str, value: &serde_json::Value) -> Result<Value> {
    match value {
        serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(v) => Ok(Value::Int(v)),
            None => n.as_f64().map(Value::Float).ok_or_else(|| {
                Status::invalid_argument(format!("{}.{}: number out of range", family, column))
            }),
        },
        other => Err(Status::invalid_argument(format!(
            "{}.{}: expected string or number, got {}",
            family, column, other
        ))),
    }
}

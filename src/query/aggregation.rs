use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use serde::Serialize;
use tracing::debug;

use crate::{
    store::ColumnFamilyStore,
    types::Value,
    util::{Result, Status},
};

/// Why an aggregation could not be computed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UnavailableReason {
    EmptyFamily(String),
    MissingColumn { family: String, column: String },
    /// The value column holds a string for this key
    NonNumericValue { key: String },
    /// No key has both a group value and a summable value
    NoOverlappingKeys,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::EmptyFamily(name) => write!(f, "family '{name}' has no rows"),
            UnavailableReason::MissingColumn { family, column } => {
                write!(f, "no row of family '{family}' has column '{column}'")
            },
            UnavailableReason::NonNumericValue { key } => {
                write!(f, "value for key '{key}' is not numeric")
            },
            UnavailableReason::NoOverlappingKeys => write!(f, "families share no keys"),
        }
    }
}

/// Outcome of [`AggregationAnalytic::run`].
///
/// `Unavailable` is an expected state meaning there is not enough data, and
/// is distinct from any set of groups. `Groups` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AggregationResult {
    Unavailable(UnavailableReason),
    /// Group key → summed value, sorted by group key
    Groups(BTreeMap<Value, Value>),
}

impl AggregationResult {
    pub fn is_available(&self) -> bool {
        matches!(self, AggregationResult::Groups(_))
    }

    pub fn groups(&self) -> Option<&BTreeMap<Value, Value>> {
        match self {
            AggregationResult::Groups(groups) => Some(groups),
            AggregationResult::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match self {
            AggregationResult::Unavailable(reason) => Some(reason),
            AggregationResult::Groups(_) => None,
        }
    }
}

/// Group-by-and-sum across two families joined on the primary key.
///
/// Only two columns are read: the group column of the first family and the
/// value column of the second. A key missing from the value family, or a
/// row lacking either column, contributes nothing.
pub struct AggregationAnalytic<'a> {
    store: &'a ColumnFamilyStore,
}

impl<'a> AggregationAnalytic<'a> {
    pub fn new(store: &'a ColumnFamilyStore) -> Self {
        AggregationAnalytic { store }
    }

    pub fn run(
        &self,
        group_family: &str,
        group_column: &str,
        value_family: &str,
        value_column: &str,
    ) -> Result<AggregationResult> {
        let result = self.aggregate(group_family, group_column, value_family, value_column)?;

        if self.store.options().collect_statistics {
            self.store
                .statistics()
                .record_aggregation(result.is_available());
        }
        match &result {
            AggregationResult::Groups(groups) => debug!(
                group_family,
                group_column,
                value_family,
                value_column,
                groups = groups.len(),
                "aggregation finished"
            ),
            AggregationResult::Unavailable(reason) => debug!(
                group_family,
                value_family,
                reason = %reason,
                "aggregation unavailable"
            ),
        }

        Ok(result)
    }

    fn aggregate(
        &self,
        group_family: &str,
        group_column: &str,
        value_family: &str,
        value_column: &str,
    ) -> Result<AggregationResult> {
        use AggregationResult::Unavailable;

        // One read lock for both families keeps the join consistent
        let cf_set = self.store.read();
        let groups_cf = cf_set
            .get_cf_by_name(group_family)
            .ok_or_else(|| Status::unknown_family(group_family))?;
        let values_cf = cf_set
            .get_cf_by_name(value_family)
            .ok_or_else(|| Status::unknown_family(value_family))?;

        for cf in [groups_cf, values_cf] {
            if cf.is_empty() {
                return Ok(Unavailable(UnavailableReason::EmptyFamily(
                    cf.name().to_string(),
                )));
            }
        }
        for (cf, column) in [(groups_cf, group_column), (values_cf, value_column)] {
            if !cf.has_column(column) {
                return Ok(Unavailable(UnavailableReason::MissingColumn {
                    family: cf.name().to_string(),
                    column: column.to_string(),
                }));
            }
        }

        let mut groups: BTreeMap<Value, Value> = BTreeMap::new();
        for (key, record) in groups_cf.all_records() {
            let Some(group) = record.get(group_column) else {
                continue;
            };
            let Some(value) = values_cf.get(key).and_then(|r| r.get(value_column)) else {
                continue;
            };
            if !value.is_numeric() {
                return Ok(Unavailable(UnavailableReason::NonNumericValue {
                    key: key.to_string(),
                }));
            }

            match groups.entry(group.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(value.clone());
                },
                Entry::Occupied(mut slot) => {
                    if let Some(sum) = slot.get().add_numeric(value) {
                        slot.insert(sum);
                    }
                },
            }
        }

        if groups.is_empty() {
            return Ok(Unavailable(UnavailableReason::NoOverlappingKeys));
        }
        Ok(AggregationResult::Groups(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fields;

    fn store() -> ColumnFamilyStore {
        ColumnFamilyStore::new(&["user", "geo", "metrics"]).unwrap()
    }

    fn spend_by_city(store: &ColumnFamilyStore) -> AggregationResult {
        AggregationAnalytic::new(store)
            .run("geo", "ciudad", "metrics", "gasto_publicitario")
            .unwrap()
    }

    #[test]
    fn test_sum_by_city() {
        let store = store();
        store
            .insert(
                "u1",
                [
                    ("user", fields([("nombre", "Ana")])),
                    ("geo", fields([("ciudad", "Lima")])),
                    ("metrics", fields([("gasto_publicitario", 10)])),
                ],
            )
            .unwrap();
        store
            .insert(
                "u2",
                [
                    ("geo", fields([("ciudad", "Lima")])),
                    ("metrics", fields([("gasto_publicitario", 5)])),
                ],
            )
            .unwrap();
        store
            .insert(
                "u3",
                [
                    ("geo", fields([("ciudad", "Cusco")])),
                    ("metrics", fields([("gasto_publicitario", 2.5)])),
                ],
            )
            .unwrap();

        let result = spend_by_city(&store);
        let groups = result.groups().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&Value::from("Lima")], Value::Int(15));
        assert_eq!(groups[&Value::from("Cusco")], Value::Float(2.5));

        // Sorted by group key
        let keys: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Cusco", "Lima"]);
    }

    #[test]
    fn test_empty_families_unavailable() {
        let store = store();
        let result = spend_by_city(&store);

        assert!(!result.is_available());
        assert_eq!(
            result.unavailable_reason(),
            Some(&UnavailableReason::EmptyFamily("geo".to_string()))
        );
    }

    #[test]
    fn test_missing_column_unavailable() {
        let store = store();
        store
            .insert(
                "u1",
                [
                    ("geo", fields([("pais", "Peru")])),
                    ("metrics", fields([("gasto_publicitario", 1)])),
                ],
            )
            .unwrap();

        assert_eq!(
            spend_by_city(&store).unavailable_reason(),
            Some(&UnavailableReason::MissingColumn {
                family: "geo".to_string(),
                column: "ciudad".to_string(),
            })
        );
    }

    #[test]
    fn test_key_only_in_group_family_is_skipped() {
        let store = store();
        store
            .insert(
                "u1",
                [
                    ("geo", fields([("ciudad", "Lima")])),
                    ("metrics", fields([("gasto_publicitario", 4)])),
                ],
            )
            .unwrap();
        store
            .insert("u2", [("geo", fields([("ciudad", "Lima")]))])
            .unwrap();
        store
            .insert("u3", [("geo", fields([("ciudad", "Arequipa")]))])
            .unwrap();

        let result = spend_by_city(&store);
        let groups = result.groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[&Value::from("Lima")], Value::Int(4));
    }

    #[test]
    fn test_no_overlapping_keys() {
        let store = store();
        store
            .insert("u1", [("geo", fields([("ciudad", "Lima")]))])
            .unwrap();
        store
            .insert("u2", [("metrics", fields([("gasto_publicitario", 1)]))])
            .unwrap();

        assert_eq!(
            spend_by_city(&store).unavailable_reason(),
            Some(&UnavailableReason::NoOverlappingKeys)
        );
    }

    #[test]
    fn test_non_numeric_value() {
        let store = store();
        store
            .insert(
                "u1",
                [
                    ("geo", fields([("ciudad", "Lima")])),
                    ("metrics", fields([("gasto_publicitario", "mucho")])),
                ],
            )
            .unwrap();

        assert_eq!(
            spend_by_city(&store).unavailable_reason(),
            Some(&UnavailableReason::NonNumericValue {
                key: "u1".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_family_is_error() {
        let store = store();
        let err = AggregationAnalytic::new(&store)
            .run("geo", "ciudad", "sales", "total")
            .unwrap_err();
        assert_eq!(err.message(), Some("unknown family: sales"));
    }

    #[test]
    fn test_statistics_recorded() {
        let store = store();
        spend_by_city(&store);
        assert_eq!(store.statistics().num_aggregations(), 1);
    }
}

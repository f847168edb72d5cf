#![no_main]

use libfuzzer_sys::fuzz_target;
use widecol::{AggregationAnalytic, ColumnFamilyStore, ProjectionQuery, Value, fields};

const FAMILIES: [&str; 2] = ["geo", "metrics"];
const COLUMNS: [&str; 3] = ["ciudad", "gasto", "extra"];

// Fuzz target for mixed inserts, projections and aggregations.
// Each 3-byte chunk is (op, key, payload).
fuzz_target!(|data: &[u8]| {
    let store = match ColumnFamilyStore::new(&FAMILIES) {
        Ok(store) => store,
        Err(_) => return,
    };

    for chunk in data.chunks_exact(3) {
        let (op, key, payload) = (chunk[0], chunk[1], chunk[2]);
        let family = FAMILIES[(op as usize >> 2) % FAMILIES.len()];
        let column = COLUMNS[payload as usize % COLUMNS.len()];

        match op % 4 {
            0 => {
                let value = if payload % 2 == 0 {
                    Value::Int(payload as i64)
                } else {
                    Value::from(format!("v{payload}"))
                };
                let _ = store.insert(&format!("k{key}"), [(family, fields([(column, value)]))]);
            },
            1 => {
                let _ = store.insert("", [(family, fields([(column, payload as i64)]))]);
            },
            2 => {
                let result = ProjectionQuery::new(&store).run(family, &[column]).unwrap();
                for row in result.rows() {
                    assert!(row.fields.len() <= 1);
                }
            },
            _ => {
                let _ = AggregationAnalytic::new(&store)
                    .run("geo", "ciudad", "metrics", "gasto")
                    .unwrap();
            },
        }
    }

    assert_eq!(store.statistics().num_rejected_writes() > 0, data.chunks_exact(3).any(|c| c[0] % 4 == 1));
});

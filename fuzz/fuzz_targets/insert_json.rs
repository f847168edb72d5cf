#![no_main]

use libfuzzer_sys::fuzz_target;
use widecol::ColumnFamilyStore;

// Fuzz target for the JSON insert path.
// Arbitrary bytes must either insert cleanly or be rejected without effect.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let store = match ColumnFamilyStore::new(&["user", "geo", "metrics"]) {
        Ok(store) => store,
        Err(_) => return,
    };

    match store.insert_json_str("k", text) {
        Ok(ts) => {
            for name in store.family_names() {
                if let Ok(Some(record)) = store.get(&name, "k") {
                    assert_eq!(record.timestamp(), ts);
                }
            }
        },
        Err(_) => {
            for name in store.family_names() {
                assert_eq!(store.len(&name).unwrap_or(0), 0);
            }
        },
    }
});

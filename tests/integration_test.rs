use widecol::{
    AggregationAnalytic, AggregationResult, ColumnFamilyStore, ProjectionQuery, RowMutation,
    UnavailableReason, Value, fields,
};

fn new_store() -> ColumnFamilyStore {
    ColumnFamilyStore::new(&["user", "geo", "metrics"]).unwrap()
}

#[test]
fn test_spend_by_city_scenario() {
    let store = new_store();

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

    let result = AggregationAnalytic::new(&store)
        .run("geo", "ciudad", "metrics", "gasto_publicitario")
        .unwrap();

    let groups = result.groups().expect("analytics should be available");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.get(&Value::from("Lima")), Some(&Value::Int(15)));
}

#[test]
fn test_projection_scenario() {
    let store = new_store();
    for (key, nombre, email) in [("u1", "Ana", "ana@x.pe"), ("u2", "Luis", "luis@x.pe")] {
        store
            .insert(key, [("user", fields([("nombre", nombre), ("email", email)]))])
            .unwrap();
    }

    let result = ProjectionQuery::new(&store).run("user", &["nombre"]).unwrap();

    assert_eq!(result.metrics().unwrap().ignored_column_count, 1);
    for row in result.rows() {
        assert_eq!(row.fields.keys().collect::<Vec<_>>(), vec!["nombre"]);
    }
}

#[test]
fn test_insert_writes_all_families_with_one_timestamp() {
    let store = new_store();
    let ts = store
        .insert(
            "u1",
            [
                ("user", fields([("nombre", "Ana"), ("email", "ana@x.pe")])),
                ("geo", fields([("pais", "Peru"), ("ciudad", "Lima")])),
                (
                    "metrics",
                    fields([
                        ("visitas", Value::Int(3)),
                        ("gasto_total", Value::Float(20.5)),
                        ("gasto_publicitario", Value::Float(4.0)),
                    ]),
                ),
            ],
        )
        .unwrap();

    let timestamps: Vec<u64> = store
        .family_names()
        .iter()
        .map(|name| store.get(name, "u1").unwrap().unwrap().timestamp())
        .collect();
    assert_eq!(timestamps, vec![ts, ts, ts]);
}

#[test]
fn test_overwrite_replaces_record() {
    let store = new_store();
    store
        .insert(
            "u1",
            [
                ("user", fields([("nombre", "Ana"), ("email", "ana@x.pe")])),
                ("geo", fields([("ciudad", "Lima")])),
            ],
        )
        .unwrap();
    let ts = store
        .insert("u1", [("user", fields([("nombre", "Ana Maria")]))])
        .unwrap();

    let user = store.get("user", "u1").unwrap().unwrap();
    assert_eq!(user.fields(), &fields([("nombre", "Ana Maria")]));
    assert_eq!(user.timestamp(), ts);

    // Families not named by the second insert keep their record
    let geo = store.get("geo", "u1").unwrap().unwrap();
    assert_eq!(geo.get("ciudad"), Some(&Value::from("Lima")));
}

#[test]
fn test_validation_errors_have_no_effect() {
    let store = new_store();

    let err = store
        .insert("", [("user", fields([("nombre", "Ana")]))])
        .unwrap_err();
    assert_eq!(err.to_string(), "InvalidArgument: missing primary key");

    let err = store
        .write(
            RowMutation::new("u1")
                .put("user", fields([("nombre", "Ana")]))
                .put("Datos_Usuario", fields([("nombre", "Ana")])),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "InvalidArgument: unknown family: Datos_Usuario");

    for name in store.family_names() {
        assert!(store.family(&name).unwrap().is_empty());
    }
}

#[test]
fn test_family_listing() {
    let store = new_store();
    store
        .insert("b", [("geo", fields([("ciudad", "Cusco")]))])
        .unwrap();
    store
        .insert("a", [("geo", fields([("ciudad", "Lima")]))])
        .unwrap();

    let geo = store.family("geo").unwrap();
    let listed: Vec<(&str, String)> = geo
        .all_records()
        .map(|(k, r)| (k, r.get("ciudad").unwrap().to_string()))
        .collect();
    assert_eq!(
        listed,
        vec![("a", "Lima".to_string()), ("b", "Cusco".to_string())]
    );
    assert_eq!(geo.all_keys().count(), 2);
}

#[test]
fn test_analytics_unavailable_is_not_empty_groups() {
    let store = new_store();
    let result = AggregationAnalytic::new(&store)
        .run("geo", "ciudad", "metrics", "gasto_publicitario")
        .unwrap();

    assert!(matches!(
        result,
        AggregationResult::Unavailable(UnavailableReason::EmptyFamily(_))
    ));
    assert!(result.groups().is_none());
}

#[test]
fn test_json_form_input() {
    let store = new_store();
    let doc = serde_json::json!({
        "user": {"nombre": "Ana", "email": "ana@x.pe"},
        "geo": {"pais": "Peru", "ciudad": "Lima"},
        "metrics": {"visitas": 2, "gasto_total": 7.5, "gasto_publicitario": 1.5},
    });
    store.insert_json("u1", &doc).unwrap();

    let projection = ProjectionQuery::new(&store)
        .run("metrics", &["gasto_publicitario", "visitas"])
        .unwrap()
        .into_projection()
        .unwrap();

    assert_eq!(
        projection.available_columns,
        vec!["visitas", "gasto_total", "gasto_publicitario"]
    );
    assert_eq!(projection.rows[0].fields["visitas"], Value::Int(2));
    assert_eq!(projection.metrics.ignored_column_count, 1);
}

#[test]
fn test_statistics_report_after_workload() {
    let store = new_store();
    store
        .insert(
            "u1",
            [
                ("geo", fields([("ciudad", "Lima")])),
                ("metrics", fields([("gasto_publicitario", 3)])),
            ],
        )
        .unwrap();
    let _ = store.insert("", [("geo", fields([("ciudad", "Lima")]))]);
    ProjectionQuery::new(&store).run("geo", &["ciudad"]).unwrap();
    AggregationAnalytic::new(&store)
        .run("geo", "ciudad", "metrics", "gasto_publicitario")
        .unwrap();

    let stats = store.statistics();
    assert_eq!(stats.num_inserts(), 1);
    assert_eq!(stats.num_records_written(), 2);
    assert_eq!(stats.num_rejected_writes(), 1);
    assert_eq!(stats.num_projections(), 1);
    assert_eq!(stats.num_aggregations(), 1);
    assert!(stats.report().contains("Rejected:      1"));
}

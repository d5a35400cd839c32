use crate::{kind, silent_logs};
use cinder::{Connection, Param, StatementError, Value, params};
use std::collections::BTreeMap;

pub fn bind_mixed<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ? AS a, ? AS b, :x AS x")
        .expect("Could not prepare the query");
    assert_eq!(statement.parameter_count().unwrap(), 3);

    // Mappings do not take a position: 10 goes to 1, 20 to 2
    let rows = statement
        .execute_collect(params![10, { ":x" => "x" }, 20])
        .unwrap();
    assert_eq!(
        rows[0].values(),
        [Value::Integer(10), Value::Integer(20), Value::Text("x".into())]
    );

    statement
        .bind_params([
            Param::named([(":x", 3.5)]),
            Param::positional("first"),
            Param::positional(Option::<i64>::None),
        ])
        .unwrap();
    let rows = statement.execute_collect(params![]).unwrap();
    assert_eq!(
        rows[0].values(),
        [Value::Text("first".into()), Value::Null, Value::Float(3.5)]
    );
    statement.close().unwrap();
}

pub fn bind_named<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT :a AS a, @b AS b, $c AS c")
        .unwrap();
    assert_eq!(statement.parameter_index(":a").unwrap(), Some(1));
    assert_eq!(statement.parameter_index("@b").unwrap(), Some(2));
    assert_eq!(statement.parameter_index("c").unwrap(), Some(3));
    assert_eq!(statement.parameter_index(":c").unwrap(), None);

    statement
        .bind_param(":a", 1)
        .unwrap()
        .bind_param("@b", 2)
        .unwrap()
        .bind_param("$c", 3)
        .unwrap();
    let row = statement.execute(params![]).unwrap().next().unwrap().unwrap();
    assert_eq!(row.get::<i64>("a").unwrap(), 1);
    assert_eq!(row.get::<i64>("b").unwrap(), 2);
    assert_eq!(row.get::<i64>("c").unwrap(), 3);

    // Bare names find their prefix
    let rows = statement
        .execute_collect(params![{ "a" => "x", "b" => "y", "c" => "z" }])
        .unwrap();
    assert_eq!(rows[0].get::<String>("a").unwrap(), "x");
    assert_eq!(rows[0].get::<String>("b").unwrap(), "y");
    assert_eq!(rows[0].get::<String>("c").unwrap(), "z");

    let mut map = BTreeMap::new();
    map.insert(":a".to_string(), 100);
    map.insert("@b".to_string(), 200);
    map.insert("c".to_string(), 300);
    let rows = statement.execute_collect([Param::from(map)]).unwrap();
    assert_eq!(
        rows[0].values(),
        [Value::Integer(100), Value::Integer(200), Value::Integer(300)]
    );

    // Numbered placeholders bound by position
    let mut statement = connection.prepare("SELECT ?2 AS two, ?1 AS one").unwrap();
    let rows = statement.execute_collect(params!["first", "second"]).unwrap();
    assert_eq!(rows[0].get::<String>("one").unwrap(), "first");
    assert_eq!(rows[0].get::<String>("two").unwrap(), "second");
    statement
        .bind_param("?1", "uno")
        .unwrap()
        .bind_param(2, "dos")
        .unwrap();
    let rows = statement.execute_collect(params![]).unwrap();
    assert_eq!(rows[0].get::<String>("one").unwrap(), "uno");
    assert_eq!(rows[0].get::<String>("two").unwrap(), "dos");
}

pub fn bind_unknown<C: Connection>(connection: &C) {
    let mut statement = connection.prepare("SELECT :a AS a").unwrap();
    statement.bind_param(":a", 7).unwrap();
    silent_logs! {
        let error = statement.bind_param(":nope", 1).unwrap_err();
        assert_eq!(
            kind(&error),
            &StatementError::UnknownParameter(":nope".into())
        );
        let error = statement.bind_param("nope", 1).unwrap_err();
        assert!(kind(&error).is_unknown_parameter());
        let error = statement
            .execute(params![{ "b" => 1 }])
            .err()
            .unwrap();
        assert!(kind(&error).is_unknown_parameter());
    };
    assert!(!statement.is_closed());
    let rows = statement.execute_collect(params![]).unwrap();
    assert_eq!(rows[0].get::<i64>("a").unwrap(), 7);
}

pub fn bind_out_of_range<C: Connection>(connection: &C) {
    let mut statement = connection.prepare("SELECT ? AS a").unwrap();
    silent_logs! {
        let error = statement.bind_param(2, 1).unwrap_err();
        let StatementError::Engine(engine) = kind(&error) else {
            panic!("Expected an engine error, got: {:#}", error);
        };
        assert_ne!(engine.code, 0);
        let error = statement.bind_param(0, 1).unwrap_err();
        assert!(matches!(kind(&error), StatementError::Engine(..)));
        let error = statement.bind_param(1, u64::MAX).unwrap_err();
        assert!(matches!(kind(&error), StatementError::OutOfRange(..)));
        let error = statement.execute(params![1, 2]).err().unwrap();
        assert!(matches!(kind(&error), StatementError::Engine(..)));
    };
    assert!(!statement.is_closed());
    let rows = statement.execute_collect(params![u64::MAX >> 1]).unwrap();
    assert_eq!(rows[0].get::<i64>("a").unwrap(), i64::MAX);
}

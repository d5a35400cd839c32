use crate::{kind, silent_logs};
use cinder::{Connection, Param, StatementError, params};
use indoc::indoc;

pub fn remainder<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT 1 AS one; SELECT 2")
        .expect("Could not prepare the query");
    assert_eq!(statement.remainder(), " SELECT 2");
    assert_eq!(statement.sql(), "SELECT 1 AS one; SELECT 2");
    statement.close().unwrap();

    let statement = connection.prepare("SELECT 1 AS one").unwrap();
    assert_eq!(statement.remainder(), "");

    let statement = connection.prepare("SELECT 1 AS one;").unwrap();
    assert_eq!(statement.remainder(), "");

    let statement = connection
        .prepare("SELECT 1;\n\tSELECT 2;\nSELECT 3")
        .unwrap();
    assert_eq!(statement.remainder(), "\n\tSELECT 2;\nSELECT 3");
}

pub fn closed<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ? AS a, :x AS x")
        .expect("Could not prepare the query");
    assert!(!statement.is_closed());
    statement.close().expect("Could not close the statement");
    assert!(statement.is_closed());
    silent_logs! {
        assert!(kind(&statement.close().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.execute(params![]).err().unwrap()).is_invalid_state());
        assert!(kind(&statement.execute(params![1]).err().unwrap()).is_invalid_state());
        assert!(kind(&statement.execute_collect(params![]).unwrap_err()).is_invalid_state());
        assert!(kind(&statement.execute_each(params![], |_| Ok(())).unwrap_err()).is_invalid_state());
        assert!(kind(&statement.bind_param(1, 1).unwrap_err()).is_invalid_state());
        assert!(kind(&statement.bind_param(":x", 1).unwrap_err()).is_invalid_state());
        assert!(kind(&statement.bind_params([Param::positional(1)]).unwrap_err()).is_invalid_state());
        assert!(kind(&statement.columns().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.types().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.clear_bindings().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.reset().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.parameter_count().unwrap_err()).is_invalid_state());
        assert!(kind(&statement.parameter_index(":x").unwrap_err()).is_invalid_state());
    };
    assert!(statement.is_closed());

    // Metadata computed while open is not handed out once closed
    let mut statement = connection.prepare("SELECT 1 AS a").unwrap();
    assert_eq!(&*statement.columns().unwrap(), ["a"]);
    statement.close().unwrap();
    silent_logs! {
        assert!(kind(&statement.columns().unwrap_err()).is_invalid_state());
    };
}

pub fn compile_error<C: Connection>(connection: &C) {
    silent_logs! {
        let error = connection.prepare("SELEC 1").unwrap_err();
        let StatementError::Compile(engine) = kind(&error) else {
            panic!("Expected a compile error, got: {:#}", error);
        };
        assert_ne!(engine.code, 0);
        assert!(!engine.message.is_empty());
        assert!(format!("{:#}", error).contains("SELEC 1"));

        let error = connection
            .prepare("SELECT * FROM table_that_does_not_exist")
            .unwrap_err();
        assert!(matches!(kind(&error), StatementError::Compile(..)));

        let error = connection.prepare("   ").unwrap_err();
        assert!(matches!(kind(&error), StatementError::Compile(..)));
    };
}

pub fn reexecute<C: Connection>(connection: &C) {
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS lifecycle_item;
            CREATE TABLE lifecycle_item (id INTEGER, label TEXT);
            INSERT INTO lifecycle_item VALUES (1, 'one'), (2, 'two'), (3, 'three');
        "})
        .expect("Could not create the table");
    let mut statement = connection
        .prepare("SELECT id FROM lifecycle_item WHERE id >= ? ORDER BY id")
        .unwrap();
    {
        let mut cursor = statement.execute(params![1]).unwrap();
        let row = cursor.next().unwrap().unwrap();
        assert_eq!(row.get::<i64>("id").unwrap(), 1);
        assert!(!cursor.is_done());
    }
    let ids = statement
        .execute(params![])
        .unwrap()
        .map(|row| row.and_then(|row| row.get::<i64>("id")))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(ids, [1, 2, 3]);

    let count = statement
        .execute_with(params![2], |cursor| cursor.count())
        .unwrap();
    assert_eq!(count, 2);

    // Exhausted cursors stay exhausted
    let mut cursor = statement.execute(params![3]).unwrap();
    assert_eq!(cursor.columns().len(), 1);
    assert!(cursor.next().is_some());
    assert!(cursor.next().is_none());
    assert!(cursor.is_done());
    assert!(cursor.next().is_none());

    let mut ids = Vec::new();
    statement
        .execute_each(params![0], |row| {
            ids.push(row.get::<i64>("id")?);
            Ok(())
        })
        .unwrap();
    assert_eq!(ids, [1, 2, 3]);

    // Explicit reset keeps the bindings
    statement.bind_param(1, 2).unwrap();
    statement.reset().unwrap();
    assert_eq!(statement.execute_collect(params![]).unwrap().len(), 2);

    statement.clear_bindings().unwrap();
    assert_eq!(statement.execute_collect(params![]).unwrap().len(), 0);
    statement.close().unwrap();
}

use cinder::{Connection, Value, params};
use indoc::indoc;

pub fn scenario<C: Connection>(connection: &C) {
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS t;
            CREATE TABLE t (id INTEGER, name TEXT);
            INSERT INTO t VALUES (4, 'four'), (5, 'five'), (6, 'six');
        "})
        .expect("Could not create the table");

    let mut statement = connection
        .prepare("select id, name from t where id = ? ; select 1")
        .expect("Could not prepare the query");
    assert_eq!(statement.remainder(), " select 1");
    assert_eq!(&*statement.columns().unwrap(), ["id", "name"]);
    let rows = statement.execute_collect(params![5]).unwrap();
    assert_eq!(rows.len(), 1);
    for row in &rows {
        assert_eq!(row.get::<i64>("id").unwrap(), 5);
        assert_eq!(row.get::<String>("name").unwrap(), "five");
        assert_eq!(row.values(), [Value::Integer(5), Value::Text("five".into())]);
    }
    statement.close().unwrap();

    // Statements with side effects run on execute, even when no row is pulled
    let mut insert = connection
        .prepare("INSERT INTO t (id, name) VALUES (?, ?)")
        .unwrap();
    {
        let cursor = insert.execute(params![7, "seven"]).unwrap();
        assert!(cursor.is_done());
        assert!(cursor.columns().is_empty());
    }
    insert.execute(params![8, "eight"]).unwrap();
    insert.close().unwrap();

    let mut select = connection
        .prepare("SELECT name FROM t WHERE id > ? ORDER BY id")
        .unwrap();
    let names = select
        .execute_collect(params![6])
        .unwrap()
        .into_iter()
        .map(|row| row.get::<String>("name"))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(names, ["seven", "eight"]);
}

use cinder::{Connection, params};
use indoc::indoc;
use std::sync::Arc;

pub fn metadata<C: Connection>(connection: &C) {
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS meta_item;
            CREATE TABLE meta_item (id INTEGER, name TEXT, price REAL, data BLOB);
            INSERT INTO meta_item VALUES (1, 'one', 1.5, X'01');
        "})
        .expect("Could not create the table");
    let mut statement = connection
        .prepare("SELECT id, name, price, data, 1 + 1 AS two FROM meta_item")
        .unwrap();
    let columns = statement.columns().unwrap();
    assert_eq!(&*columns, ["id", "name", "price", "data", "two"]);
    let types = statement.types().unwrap();
    assert_eq!(types.len(), columns.len());
    #[cfg(not(feature = "disable-decltype"))]
    assert_eq!(
        &*types,
        [
            Some("INTEGER".to_string()),
            Some("TEXT".to_string()),
            Some("REAL".to_string()),
            Some("BLOB".to_string()),
            None,
        ]
    );

    // Computed once, then frozen
    assert!(Arc::ptr_eq(&columns, &statement.columns().unwrap()));
    assert!(Arc::ptr_eq(&types, &statement.types().unwrap()));

    let cursor = statement.execute(params![]).unwrap();
    assert!(Arc::ptr_eq(&columns, cursor.columns()));
    assert!(Arc::ptr_eq(&types, cursor.types()));
    let rows = cursor.collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(Arc::ptr_eq(&columns, &rows[0].labels));
    assert_eq!(rows[0].get::<i64>("two").unwrap(), 2);
    assert_eq!(rows[0].get::<f64>("price").unwrap(), 1.5);

    // Statements without result columns have empty metadata
    let mut statement = connection
        .prepare("DELETE FROM meta_item WHERE id = ?")
        .unwrap();
    assert!(statement.columns().unwrap().is_empty());
    assert!(statement.types().unwrap().is_empty());
}

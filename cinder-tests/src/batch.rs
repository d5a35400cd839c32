use cinder::{Connection, params};
use indoc::indoc;

pub fn batch<C: Connection>(connection: &C) {
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS batch_item;
            CREATE TABLE batch_item (id INTEGER PRIMARY KEY, label TEXT);
            INSERT INTO batch_item (label) VALUES ('a'), ('b');
            /* the last one */
            INSERT INTO batch_item (label) VALUES ('c'); -- done
        "})
        .expect("Could not execute the batch");
    let mut statement = connection
        .prepare("SELECT count(*) AS n, group_concat(label, '') AS labels FROM batch_item")
        .expect("Could not prepare the count query");
    let rows = statement
        .execute_collect(params![])
        .expect("Could not count the rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<i64>("n").unwrap(), 3);
    assert_eq!(rows[0].get::<String>("labels").unwrap(), "abc");
    statement.close().expect("Could not close the statement");

    // Whitespace and comments only
    connection
        .execute_batch("  \n -- nothing here\n /* nor here */ ")
        .expect("An empty batch should succeed");
}

#[cfg(test)]
mod tests {
    use cinder::{Connection, Param, StatementError, Value, params, to_blob};
    use cinder_sqlite::SqliteConnection;
    use indoc::indoc;
    use std::collections::HashMap;

    #[test]
    fn prepare_bind_execute_close() {
        let connection = SqliteConnection::connect("sqlite://:memory:").unwrap();
        connection
            .execute_batch(indoc! {"
                CREATE TABLE book (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    cover BLOB
                );
                INSERT INTO book (id, title) VALUES (1, 'Dune'), (2, 'Emma'), (5, 'Ulysses');
            "})
            .unwrap();

        let mut statement = connection
            .prepare("select id, title from book where id = ? ; select 1")
            .unwrap();
        assert_eq!(statement.remainder(), " select 1");
        assert_eq!(*statement.columns().unwrap(), ["id", "title"].map(String::from));
        let rows = statement.execute_collect(params![5]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get::<i64>("id").unwrap(), 5);
        assert_eq!(rows[0].get::<String>("title").unwrap(), "Ulysses");
        let rows = statement.execute_collect(params![2]).unwrap();
        assert_eq!(rows[0].get::<String>("title").unwrap(), "Emma");
        statement.close().unwrap();
        let error = statement.execute(params![1]).err().unwrap();
        assert!(StatementError::of(&error).unwrap().is_invalid_state());

        let mut update = connection
            .prepare("update book set cover = :cover where title = $title")
            .unwrap();
        let mut entries: HashMap<&str, Box<dyn cinder::AsValue>> = HashMap::new();
        entries.insert("cover", Box::new(to_blob("png")));
        entries.insert("title", Box::new("Dune"));
        let cursor = update.execute([Param::from(entries)]).unwrap();
        assert!(cursor.is_done());
        drop(cursor);
        update.close().unwrap();

        let mut select = connection
            .prepare("select cover from book where cover is not null")
            .unwrap();
        let covers = select
            .execute(params![])
            .unwrap()
            .map(|row| row.map(|row| row.values[0].clone()))
            .collect::<cinder::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(covers, [Value::Blob(b"png".to_vec().into_boxed_slice())]);
    }
}

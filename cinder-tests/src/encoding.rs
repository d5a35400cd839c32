use cinder::{Connection, Encoding, Value, params};

pub fn utf16<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare_with("SELECT 'é' AS a, ? AS b; SELECT '∑'", Encoding::Utf16)
        .expect("Could not prepare the query in utf-16");
    assert_eq!(statement.remainder(), " SELECT '∑'");
    let rows = statement.execute_collect(params!["ü"]).unwrap();
    assert_eq!(rows[0].get::<String>("a").unwrap(), "é");
    assert_eq!(rows[0].get::<String>("b").unwrap(), "ü");
    statement.close().unwrap();

    // Surrogate pairs before the tail
    let mut statement = connection
        .prepare_with("SELECT '😀' AS a, ? AS b; SELECT 'x'", Encoding::Utf16)
        .unwrap();
    assert_eq!(statement.remainder(), " SELECT 'x'");
    let rows = statement.execute_collect(params!["é"]).unwrap();
    assert_eq!(
        rows[0].values(),
        [Value::Text("😀".into()), Value::Text("é".into())]
    );
    statement.close().unwrap();

    let statement = connection
        .prepare_with("SELECT 1", Encoding::Utf16)
        .unwrap();
    assert_eq!(statement.remainder(), "");
}

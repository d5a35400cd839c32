use cinder::{
    AsValue, Blob, Connection, Driver, FromValue, Statement, Value, params, to_blob,
};
use rust_decimal::Decimal;
use std::borrow::Cow;
use time::macros::{date, datetime};
use uuid::Uuid;

fn type_of<D: Driver>(statement: &mut Statement<'_, D>, value: impl AsValue) -> String {
    statement
        .bind_param(1, value)
        .expect("Could not bind the value");
    statement
        .execute(params![])
        .and_then(|mut cursor| cursor.next().expect("Expected a row"))
        .and_then(|row| row.get::<String>("t"))
        .expect("Could not read the storage type")
}

fn round_trip<D: Driver>(statement: &mut Statement<'_, D>, value: impl AsValue) -> Value {
    statement.bind_param(1, value).expect("Could not bind the value");
    let rows = statement.execute_collect(params![]).expect("Could not execute");
    rows[0].values[0].clone()
}

pub fn classify<C: Connection>(connection: &C) {
    let mut statement = connection.prepare("SELECT typeof(?) AS t").unwrap();
    assert_eq!(type_of(&mut statement, 5), "integer");
    assert_eq!(type_of(&mut statement, -5i8), "integer");
    assert_eq!(type_of(&mut statement, 5u64), "integer");
    assert_eq!(type_of(&mut statement, 5usize), "integer");
    assert_eq!(type_of(&mut statement, true), "integer");
    assert_eq!(type_of(&mut statement, 2.5), "real");
    assert_eq!(type_of(&mut statement, 2.5f32), "real");
    assert_eq!(type_of(&mut statement, 3.0), "real");
    assert_eq!(type_of(&mut statement, Decimal::new(125, 2)), "real");
    assert_eq!(type_of(&mut statement, Decimal::new(3, 0)), "real");
    assert_eq!(type_of(&mut statement, Option::<i64>::None), "null");
    assert_eq!(type_of(&mut statement, Some(1)), "integer");
    assert_eq!(type_of(&mut statement, Value::Null), "null");
    assert_eq!(type_of(&mut statement, "5"), "text");
    assert_eq!(type_of(&mut statement, "5".to_string()), "text");
    assert_eq!(type_of(&mut statement, Cow::Borrowed("x")), "text");
    assert_eq!(type_of(&mut statement, 'c'), "text");
    assert_eq!(type_of(&mut statement, Uuid::new_v4()), "text");
    assert_eq!(type_of(&mut statement, date!(2024 - 01 - 02)), "text");
    assert_eq!(type_of(&mut statement, to_blob("12")), "blob");
    assert_eq!(type_of(&mut statement, Blob::new(vec![1, 2])), "blob");
    assert_eq!(type_of(&mut statement, vec![1u8, 2u8]), "blob");
    assert_eq!(type_of(&mut statement, &b"raw"[..]), "blob");
    assert_eq!(type_of(&mut statement, Some(to_blob("5"))), "blob");
    statement.close().unwrap();

    let mut statement = connection.prepare("SELECT ? AS v").unwrap();
    assert_eq!(round_trip(&mut statement, 1.5), Value::Float(1.5));
    assert_eq!(round_trip(&mut statement, i64::MIN), Value::Integer(i64::MIN));
    assert_eq!(round_trip(&mut statement, "héllo"), Value::Text("héllo".into()));
    assert_eq!(round_trip(&mut statement, ""), Value::Text("".into()));
    let timestamp = datetime!(2024-01-02 03:04:05);
    assert_eq!(
        round_trip(&mut statement, timestamp),
        Value::Text(timestamp.to_string())
    );
    let uuid = Uuid::new_v4();
    let value = round_trip(&mut statement, uuid);
    assert_eq!(uuid.as_value().unwrap(), value);
    assert_eq!(Uuid::try_from_value(value).unwrap(), uuid);
    statement.close().unwrap();
}

pub fn blobs<C: Connection>(connection: &C) {
    let mut statement = connection.prepare("select ? as a").unwrap();
    let rows = statement
        .execute_collect(params![to_blob(b"\x00\x01")])
        .unwrap();
    assert_eq!(
        rows[0].get_column("a"),
        Some(&Value::Blob(vec![0x00, 0x01].into_boxed_slice()))
    );
    assert_eq!(rows[0].get::<Vec<u8>>("a").unwrap(), b"\x00\x01");

    // Not valid utf-8, must not be mangled
    let rows = statement
        .execute_collect(params![to_blob([0xff, 0xfe, 0x00, 0x7f])])
        .unwrap();
    assert_eq!(rows[0].get::<Blob>("a").unwrap(), Blob::new([0xff, 0xfe, 0x00, 0x7f]));

    let rows = statement.execute_collect(params![to_blob(b"")]).unwrap();
    assert_eq!(
        rows[0].get_column("a"),
        Some(&Value::Blob(Vec::new().into_boxed_slice()))
    );
    statement.close().unwrap();
}

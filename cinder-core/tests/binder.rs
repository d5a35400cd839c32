mod mock;

#[cfg(test)]
mod tests {
    use crate::mock::{Call, MockConnection};
    use cinder_core::{Connection, Param, StatementError, Value, params, to_blob};
    use std::collections::BTreeMap;

    fn kind(error: &cinder_core::Error) -> &StatementError {
        StatementError::of(error).expect("Expected a statement error")
    }

    #[test]
    fn mixed_list_positions() {
        let connection = MockConnection::new(1);
        let mut statement = connection
            .prepare("SELECT n, a, b, x WHERE a = ? AND b = ? AND x = :x")
            .unwrap();
        connection.forget();
        statement
            .bind_params(params![10, { ":x" => "x" }, 20])
            .unwrap();
        assert_eq!(
            connection.binds(),
            [
                (1, Value::Integer(10)),
                (3, Value::Text("x".into())),
                (2, Value::Integer(20)),
            ]
        );
        let rows = statement.execute_collect(params![]).unwrap();
        assert_eq!(
            rows[0].values(),
            [
                Value::Integer(1),
                Value::Integer(10),
                Value::Integer(20),
                Value::Text("x".into()),
            ]
        );
    }

    #[test]
    fn mapping_does_not_take_a_position() {
        let connection = MockConnection::new(1);
        let mut statement = connection
            .prepare("SELECT n WHERE a = :a AND b = ? AND c = ?")
            .unwrap();
        connection.forget();
        statement
            .bind_params([
                Param::named([("a", 1.5)]),
                Param::positional("b"),
                Param::positional(None::<i64>),
            ])
            .unwrap();
        assert_eq!(
            connection.binds(),
            [
                (1, Value::Float(1.5)),
                (1, Value::Text("b".into())),
                (2, Value::Null),
            ]
        );
    }

    #[test]
    fn names_and_prefixes() {
        let connection = MockConnection::new(1);
        let statement = connection
            .prepare("SELECT n WHERE a = :a AND b = @b AND c = $c AND d = ?4")
            .unwrap();
        assert_eq!(statement.parameter_count().unwrap(), 4);
        assert_eq!(statement.parameter_index(":a").unwrap(), Some(1));
        assert_eq!(statement.parameter_index("@b").unwrap(), Some(2));
        assert_eq!(statement.parameter_index("$c").unwrap(), Some(3));
        assert_eq!(statement.parameter_index("?4").unwrap(), Some(4));
        assert_eq!(statement.parameter_index("a").unwrap(), Some(1));
        assert_eq!(statement.parameter_index("b").unwrap(), Some(2));
        assert_eq!(statement.parameter_index("c").unwrap(), Some(3));
        assert_eq!(statement.parameter_index("4").unwrap(), None);
        assert_eq!(statement.parameter_index(":b").unwrap(), None);
        assert_eq!(statement.parameter_index("z").unwrap(), None);
    }

    #[test]
    fn map_parameters() {
        let connection = MockConnection::new(1);
        let mut statement = connection
            .prepare("SELECT n, a, b WHERE a = :a AND b = :b")
            .unwrap();
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), "second");
        map.insert("a".to_string(), "first");
        let row = statement
            .execute([Param::from(map)])
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.get::<String>("a").unwrap(), "first");
        assert_eq!(row.get::<String>("b").unwrap(), "second");
    }

    #[test]
    fn unknown_name_binds_nothing() {
        let connection = MockConnection::new(1);
        let mut statement = connection.prepare("SELECT n, a WHERE a = :a").unwrap();
        statement.bind_param(":a", 7).unwrap();
        connection.forget();
        let error = statement.bind_param(":nope", 1).unwrap_err();
        assert_eq!(
            kind(&error),
            &StatementError::UnknownParameter(":nope".into())
        );
        let error = statement
            .bind_params(params![{ "nope" => 1 }])
            .unwrap_err();
        assert!(kind(&error).is_unknown_parameter());
        assert!(connection.binds().is_empty());

        let rows = statement.execute_collect(params![]).unwrap();
        assert_eq!(rows[0].get::<i64>("a").unwrap(), 7);
    }

    #[test]
    fn positions_out_of_range() {
        let connection = MockConnection::new(1);
        let mut statement = connection.prepare("SELECT n WHERE a = ?").unwrap();
        for index in [0usize, 2] {
            let error = statement.bind_param(index, 1).unwrap_err();
            assert!(matches!(kind(&error), StatementError::Engine(..)));
            assert_eq!(kind(&error).code(), Some(25));
        }
        let error = statement.bind_param(-1, 1).unwrap_err();
        assert!(matches!(kind(&error), StatementError::Engine(..)));
        let error = statement.bind_params(params![1, 2]).unwrap_err();
        assert_eq!(kind(&error).code(), Some(25));
        // The first position was bound before the failure
        assert_eq!(connection.binds(), [(1, Value::Integer(1))]);
    }

    #[test]
    fn unrepresentable_integer() {
        let connection = MockConnection::new(1);
        let mut statement = connection.prepare("SELECT n WHERE a = ?").unwrap();
        connection.forget();
        let error = statement.bind_param(1, u64::MAX).unwrap_err();
        assert!(matches!(kind(&error), StatementError::OutOfRange(..)));
        let error = statement.bind_param(1, i128::MIN).unwrap_err();
        assert!(matches!(kind(&error), StatementError::OutOfRange(..)));
        assert!(connection.binds().is_empty());
        statement.bind_param(1, i64::MAX as u64).unwrap();
        assert_eq!(connection.binds(), [(1, Value::Integer(i64::MAX))]);
    }

    #[test]
    fn storage_classes() {
        let connection = MockConnection::new(1);
        let mut statement = connection
            .prepare("SELECT n WHERE a = ? AND b = ? AND c = ? AND d = ? AND e = ? AND f = ?")
            .unwrap();
        connection.forget();
        statement
            .bind_params(params![
                true,
                2.0f32,
                to_blob("12"),
                None::<&str>,
                'x',
                Some(vec![0u8, 1]),
            ])
            .unwrap();
        assert_eq!(
            connection.binds(),
            [
                (1, Value::Integer(1)),
                (2, Value::Float(2.0)),
                (3, Value::Blob(b"12".to_vec().into_boxed_slice())),
                (4, Value::Null),
                (5, Value::Text("x".into())),
                (6, Value::Blob(vec![0, 1].into_boxed_slice())),
            ]
        );
    }

    #[test]
    fn execute_binds_only_when_given() {
        let connection = MockConnection::new(1);
        let mut statement = connection.prepare("SELECT n, a WHERE a = ?").unwrap();
        statement.execute_collect(params![3]).unwrap();
        connection.forget();
        let rows = statement.execute_collect(params![]).unwrap();
        assert!(connection.binds().is_empty());
        assert_eq!(rows[0].get::<i64>("a").unwrap(), 3);

        statement.clear_bindings().unwrap();
        assert_eq!(connection.count(&Call::ClearBindings), 1);
        let rows = statement.execute_collect(params![]).unwrap();
        assert_eq!(rows[0].get_column("a"), Some(&Value::Null));
    }
}

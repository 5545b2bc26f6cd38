#[cfg(test)]
mod tests {
    use rowscan_core::{
        Array, Destination, Error, ErrorKind, FieldDef, FromValue, Record, RowLabeled, RowSource,
        Rows, ScanError, Scanner, Schema, Slot, Target, Value, collect_fields, read_struct,
    };
    use std::{rc::Rc, sync::Arc, sync::LazyLock};

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Default, Debug, PartialEq)]
    struct Person {
        name: String,
        tags: Vec<String>,
        count: i32,
        nickname: Option<String>,
        revision: i64,
    }

    impl Record for Person {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
                Schema::build(
                    "Person",
                    [
                        Slot::Field(
                            0,
                            FieldDef::new("name", "name", String::KIND, String::NULLABLE, true),
                        ),
                        Slot::Field(
                            1,
                            FieldDef::new("tags", "tags", Vec::<String>::KIND, false, true),
                        ),
                        Slot::Field(
                            2,
                            FieldDef::new("count", "count", i32::KIND, i32::NULLABLE, true),
                        ),
                        Slot::Field(
                            3,
                            FieldDef::new(
                                "nickname",
                                "nickname",
                                Option::<String>::KIND,
                                Option::<String>::NULLABLE,
                                true,
                            ),
                        ),
                        Slot::Field(
                            4,
                            FieldDef::new("revision", "revision", i64::KIND, false, false),
                        ),
                    ],
                )
            });
            &SCHEMA
        }

        fn record_schema(&self) -> &'static Schema {
            Self::schema()
        }

        fn assign(&mut self, route: &[u16], value: Value) -> Result<(), Value> {
            match route {
                [0] => self.name = FromValue::from_value(value)?,
                [1] => self.tags = FromValue::from_value(value)?,
                [2] => self.count = FromValue::from_value(value)?,
                [3] => self.nickname = FromValue::from_value(value)?,
                _ => return Err(value),
            }
            Ok(())
        }
    }

    impl Destination for Person {
        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    #[derive(Default)]
    struct Nothing;

    impl Record for Nothing {
        fn schema() -> &'static Schema {
            static SCHEMA: LazyLock<Schema> =
                LazyLock::new(|| Schema::build("Nothing", [] as [Slot; 0]));
            &SCHEMA
        }
        fn record_schema(&self) -> &'static Schema {
            Self::schema()
        }
        fn assign(&mut self, _route: &[u16], value: Value) -> Result<(), Value> {
            Err(value)
        }
    }

    impl Destination for Nothing {
        fn target(&mut self) -> Target<'_> {
            Target::Record(self)
        }
    }

    /// Fails every fetch and records whether it was asked for values.
    struct Broken {
        columns: Vec<rowscan_core::ColumnDescriptor>,
        fetched: bool,
    }

    impl RowSource for Broken {
        fn columns(&self) -> &[rowscan_core::ColumnDescriptor] {
            &self.columns
        }
        fn values(&mut self) -> rowscan_core::Result<rowscan_core::Row> {
            self.fetched = true;
            Err(Error::msg("connection reset"))
        }
    }

    fn person_row() -> RowLabeled {
        RowLabeled::new(
            ["name", "tags"],
            [
                Value::from("xy"),
                Array::simple(vec!["AA".to_string(), "BB".to_string()]).into(),
            ],
        )
    }

    #[test]
    fn read_name_and_tags() {
        init_logs();
        let mut dest = Person::default();
        read_struct(Some(&mut dest), &mut person_row()).expect("Row should be read");
        assert_eq!(dest.name, "xy");
        assert_eq!(dest.tags, ["AA", "BB"]);
        assert_eq!(dest.count, 0);
        assert_eq!(dest.nickname, None);
    }

    #[test]
    fn incompatible_scalar() {
        let mut dest = Person::default();
        let mut row = RowLabeled::new(["count"], [Value::Int64(5)]);
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert!(matches!(
            error,
            ScanError::IncompatibleDestination { ref field, ref column, value: "int8" }
                if field == "count" && column == "count"
        ));
        assert_eq!(dest.count, 0);
        assert_eq!(
            error.to_string(),
            "field `count` can't hold result `count` of type int8"
        );
    }

    #[test]
    fn unmatched_column_is_ignored() {
        let mut dest = Person {
            count: 3,
            ..Default::default()
        };
        let mut row = RowLabeled::new(["extra", "NAME"], [Value::Int32(1), Value::from("n")]);
        read_struct(Some(&mut dest), &mut row).expect("Row should be read");
        assert_eq!(dest.count, 3);
        assert_eq!(dest.name, "n");
    }

    #[test]
    fn field_receives_first_column_only() {
        let mut dest = Person::default();
        let mut row = RowLabeled::new(
            ["name", "Name", "count"],
            [Value::from("first"), Value::Int32(1), Value::Int32(9)],
        );
        read_struct(Some(&mut dest), &mut row).expect("The second `name` column has no field left");
        assert_eq!(dest.name, "first");
        assert_eq!(dest.count, 9);
    }

    #[test]
    fn nullable_field() {
        let mut dest = Person {
            nickname: Some("old".into()),
            ..Default::default()
        };
        let mut row = RowLabeled::new(["nickname"], [Value::Null]);
        read_struct(Some(&mut dest), &mut row).unwrap();
        assert_eq!(dest.nickname, None);
        let mut row = RowLabeled::new(["nickname"], [Value::from("bob")]);
        read_struct(Some(&mut dest), &mut row).unwrap();
        assert_eq!(dest.nickname.as_deref(), Some("bob"));
        let mut row = RowLabeled::new(["name"], [Value::Null]);
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IncompatibleDestination);
    }

    #[test]
    fn not_settable_field_is_skipped() {
        init_logs();
        let mut dest = Person {
            revision: 10,
            ..Default::default()
        };
        let mut row = RowLabeled::new(
            ["revision", "count"],
            [Value::from("not even the right type"), Value::Int32(2)],
        );
        read_struct(Some(&mut dest), &mut row).expect("Non settable fields are skipped");
        assert_eq!(dest.revision, 10);
        assert_eq!(dest.count, 2);
    }

    #[test]
    fn partial_population_on_failure() {
        let mut dest = Person::default();
        let mut row = RowLabeled::new(
            ["name", "count", "tags"],
            [
                Value::from("kept"),
                Value::from("wrong"),
                Array::simple(vec!["never".to_string()]).into(),
            ],
        );
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IncompatibleDestination);
        assert_eq!(dest.name, "kept");
        assert!(dest.tags.is_empty());
    }

    #[test]
    fn array_overwrites_list() {
        let mut dest = Person {
            tags: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        let mut row = RowLabeled::new(["tags"], [Array::simple(vec!["z".to_string()]).into()]);
        read_struct(Some(&mut dest), &mut row).unwrap();
        assert_eq!(dest.tags, ["z"]);
    }

    #[test]
    fn array_errors() {
        let mut dest = Person::default();
        let mut row = RowLabeled::new(
            ["tags"],
            [Array::with_shape(&[1, 2], vec!["a".to_string(), "b".to_string()]).into()],
        );
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert!(matches!(
            error,
            ScanError::NotASimpleArray { dimensions: 2, .. }
        ));
        assert!(dest.tags.is_empty());

        let mut row = RowLabeled::new(["tags"], [Array::simple(vec![1i32, 2]).into()]);
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert!(matches!(
            error,
            ScanError::IncompatibleDestination { value: "int4[]", .. }
        ));

        let mut row = RowLabeled::new(["count"], [Array::simple(vec![1i32, 2]).into()]);
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IncompatibleDestination);
    }

    #[test]
    fn destination_checks() {
        let mut row = person_row();
        let error = read_struct(None::<&mut Person>, &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DestinationAbsent);

        let person = Person::default();
        let error = read_struct(Some(&mut &person), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotAReference);

        let shared = Rc::new(Person::default());
        let mut other = shared.clone();
        let error = read_struct(Some(&mut other), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotAReference);
        drop(shared);

        let mut absent: Option<Box<Person>> = None;
        let error = read_struct(Some(&mut absent), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ReferenceIsAbsent);

        let mut number = 5i64;
        let error = read_struct(Some(&mut number), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotAComposite);

        let mut list: Vec<String> = Vec::new();
        let error = read_struct(Some(&mut list), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotAComposite);

        let mut nothing = Nothing;
        let error = read_struct(Some(&mut nothing), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyDestination);

        // None of the checks consumed the row
        assert!(row.is_pending());
        let mut dest = Person::default();
        read_struct(Some(&mut dest), &mut row).unwrap();
        assert_eq!(dest.name, "xy");
    }

    #[test]
    fn wrapped_destinations() {
        let mut boxed = Box::new(Person::default());
        read_struct(Some(&mut boxed), &mut person_row()).unwrap();
        assert_eq!(boxed.name, "xy");

        let mut unique = Arc::new(Person::default());
        read_struct(Some(&mut unique), &mut person_row()).unwrap();
        assert_eq!(unique.name, "xy");

        let mut present = Some(Person::default());
        read_struct(Some(&mut present), &mut person_row()).unwrap();
        assert_eq!(present.map(|v| v.name).as_deref(), Some("xy"));

        let mut person = Person::default();
        let dynamic: &mut dyn Destination = &mut person;
        read_struct(Some(dynamic), &mut person_row()).unwrap();
        assert_eq!(person.tags, ["AA", "BB"]);
    }

    #[test]
    fn row_source_errors() {
        let mut dest = Person::default();
        let mut broken = Broken {
            columns: vec!["name".into()],
            fetched: false,
        };
        let error = read_struct(Some(&mut dest), &mut broken).unwrap_err();
        assert!(matches!(error, ScanError::RowSource(..)));
        assert_eq!(error.to_string(), "connection reset");
        assert!(broken.fetched);

        let mut rows = Rows::new(["name"], [vec![Value::from("a")]]);
        assert!(rows.next());
        rows.fail(Error::msg("query canceled"));
        let error = read_struct(Some(&mut dest), &mut rows).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RowSource);
        assert_eq!(error.to_string(), "query canceled");
        assert_eq!(dest, Person::default());

        // Destination problems are reported before looking at the source
        let mut broken = Broken {
            columns: vec![],
            fetched: false,
        };
        let error = read_struct(Some(&mut Nothing), &mut broken).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::EmptyDestination);
        assert!(!broken.fetched);
    }

    #[test]
    fn failed_rows_stay_failed() {
        let mut dest = Person::default();
        let mut rows = Rows::new(["name"], [vec![Value::from("a")]]);
        assert!(rows.next());
        rows.fail(Error::msg("query canceled"));
        for _ in 0..2 {
            let error = read_struct(Some(&mut dest), &mut rows).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::RowSource);
            assert_eq!(error.to_string(), "query canceled");
        }
        assert_eq!(dest, Person::default());
    }

    #[test]
    fn values_fetched_once() {
        let mut dest = Person::default();
        let mut row = person_row();
        read_struct(Some(&mut dest), &mut row).unwrap();
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RowSource);
    }

    #[test]
    fn column_count_mismatch() {
        let mut dest = Person::default();
        let mut row = RowLabeled::new(["name", "count"], [Value::from("a")]);
        let error = read_struct(Some(&mut dest), &mut row).unwrap_err();
        assert!(matches!(
            error,
            ScanError::ColumnCountMismatch {
                columns: 2,
                values: 1
            }
        ));
        assert_eq!(dest.name, "");
    }

    #[test]
    fn iterate_rows() {
        let mut rows = Rows::new(
            ["count", "name"],
            [
                vec![Value::Int32(1), Value::from("one")],
                vec![Value::Int32(2), Value::from("two")],
            ],
        );
        let scanner = Scanner::new();
        let mut result = Vec::new();
        while rows.next() {
            let person: Person = scanner.read_new(&mut rows).unwrap();
            result.push((person.count, person.name));
        }
        assert_eq!(result, [(1, "one".to_string()), (2, "two".to_string())]);
        assert_eq!(rows.remaining(), 0);
        let mut dest = Person::default();
        let error = scanner.read_struct(Some(&mut dest), &mut rows).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::RowSource);
    }

    #[test]
    fn custom_matcher() {
        let scanner = Scanner::with_matcher(|field: &str, column: &str| {
            column.strip_prefix("p_") == Some(field)
        });
        let mut dest = Person::default();
        let mut row = RowLabeled::new(
            ["name", "p_name", "p_count"],
            [Value::from("plain"), Value::from("prefixed"), Value::Int32(4)],
        );
        scanner.read_struct(Some(&mut dest), &mut row).unwrap();
        assert_eq!(dest.name, "prefixed");
        assert_eq!(dest.count, 4);
    }

    #[test]
    fn collected_fields_are_stable() {
        let person = Person::default();
        let first: Vec<_> = collect_fields(&person).iter().map(|f| f.label).collect();
        let second: Vec<_> = collect_fields(&person).iter().map(|f| f.label).collect();
        assert_eq!(first, ["name", "tags", "count", "nickname", "revision"]);
        assert_eq!(first, second);
        let fields = Person::schema().fields();
        assert!(fields.iter().all(|f| f.depth == 0));
        assert_eq!(*fields[3].route, [3u16]);
        assert!(fields[3].nullable);
        assert!(!fields[4].settable);
    }
}

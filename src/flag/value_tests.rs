//! Tests for value cells and handles.

use std::time::Duration;

use super::error::ValueError;
use super::value::{Handle, TypedValue, Value, parse_bool, parse_signed, parse_unsigned};

mod handles {
    use super::*;

    #[test]
    fn clones_share_state() {
        let handle = Handle::new(1u64);
        let view = handle.clone();

        handle.replace(7);

        assert_eq!(view.get(), 7);
    }

    #[test]
    fn with_reads_without_cloning() {
        let handle = Handle::new(String::from("config.yaml"));
        assert_eq!(handle.with(String::len), 11);
    }

    #[test]
    fn default_and_from() {
        let empty: Handle<String> = Handle::default();
        assert!(empty.get().is_empty());

        let from: Handle<bool> = true.into();
        assert!(from.get());
    }
}

mod booleans {
    use super::*;

    #[test]
    fn accepted_spellings() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool(text).unwrap(), "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert!(!parse_bool(text).unwrap(), "{text}");
        }
    }

    #[test]
    fn rejects_other_text() {
        for text in ["yes", "", "tRuE", "2"] {
            assert_eq!(
                parse_bool(text),
                Err(ValueError::Syntax {
                    kind: "bool",
                    input: text.to_string(),
                })
            );
        }
    }
}

mod integers {
    use super::*;

    #[test]
    fn decimal_with_sign() {
        assert_eq!(parse_signed::<i64>("42", "int64"), Ok(42));
        assert_eq!(parse_signed::<i64>("-42", "int64"), Ok(-42));
        assert_eq!(parse_signed::<i64>("+42", "int64"), Ok(42));
    }

    #[test]
    fn base_prefixes() {
        assert_eq!(parse_signed::<i64>("0x1F", "int64"), Ok(31));
        assert_eq!(parse_signed::<i64>("0X1f", "int64"), Ok(31));
        assert_eq!(parse_signed::<i64>("0o17", "int64"), Ok(15));
        assert_eq!(parse_signed::<i64>("017", "int64"), Ok(15));
        assert_eq!(parse_signed::<i64>("0b101", "int64"), Ok(5));
        assert_eq!(parse_signed::<i64>("-0x10", "int64"), Ok(-16));
    }

    #[test]
    fn underscores_only_after_prefix() {
        assert_eq!(parse_unsigned::<u64>("0x_ff_ff", "uint64"), Ok(0xffff));
        assert!(matches!(
            parse_unsigned::<u64>("1_000", "uint64"),
            Err(ValueError::Syntax { .. })
        ));
        assert!(matches!(
            parse_unsigned::<u64>("0x_ff_", "uint64"),
            Err(ValueError::Syntax { .. })
        ));
    }

    #[test]
    fn zero_is_not_octal_prefix() {
        assert_eq!(parse_unsigned::<usize>("0", "uint"), Ok(0));
    }

    #[test]
    fn unsigned_rejects_sign() {
        assert!(matches!(
            parse_unsigned::<u64>("-1", "uint64"),
            Err(ValueError::Syntax { .. })
        ));
        assert!(matches!(
            parse_unsigned::<u64>("+1", "uint64"),
            Err(ValueError::Syntax { .. })
        ));
    }

    #[test]
    fn rejects_malformed_digits() {
        for text in ["", "12a", "0x", "09", "0b102", " 1", "1.5"] {
            assert!(
                matches!(
                    parse_signed::<i64>(text, "int64"),
                    Err(ValueError::Syntax { .. })
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn range_is_checked_per_type() {
        assert_eq!(
            parse_signed::<i64>("9223372036854775808", "int64"),
            Err(ValueError::Range {
                kind: "int64",
                input: "9223372036854775808".to_string(),
            })
        );
        assert_eq!(
            parse_signed::<i64>("-9223372036854775808", "int64"),
            Ok(i64::MIN)
        );
        assert_eq!(
            parse_unsigned::<u64>("18446744073709551615", "uint64"),
            Ok(u64::MAX)
        );
        assert!(matches!(
            parse_unsigned::<u64>("18446744073709551616", "uint64"),
            Err(ValueError::Range { .. })
        ));
    }
}

mod typed_values {
    use super::*;

    #[test]
    fn set_then_render() {
        let port = Handle::new(String::from("9999"));
        let mut value = TypedValue::String(port.clone());

        value.set("8888").unwrap();

        assert_eq!(port.get(), "8888");
        assert_eq!(value.render(), "8888");
    }

    #[test]
    fn failed_set_leaves_value_unchanged() {
        let workers = Handle::new(4usize);
        let mut value = TypedValue::Uint(workers.clone());

        assert!(value.set("many").is_err());

        assert_eq!(workers.get(), 4);
    }

    #[test]
    fn duration_round_trips_through_text() {
        let timeout = Handle::new(Duration::from_secs(30));
        let mut value = TypedValue::Duration(timeout.clone());

        assert_eq!(value.render(), "30s");
        value.set("1m30s").unwrap();

        assert_eq!(timeout.get(), Duration::from_secs(90));
        assert_eq!(value.render(), "1m30s");
    }

    #[test]
    fn duration_errors_are_wrapped() {
        let mut value = TypedValue::Duration(Handle::default());
        assert!(matches!(value.set("soon"), Err(ValueError::Duration(_))));
    }

    #[test]
    fn only_bool_is_boolean() {
        assert!(TypedValue::Bool(Handle::default()).is_bool());
        assert!(!TypedValue::String(Handle::default()).is_bool());
        assert!(!TypedValue::Int(Handle::default()).is_bool());
    }

    #[test]
    fn zero_predicate_per_variant() {
        assert!(TypedValue::String(Handle::default()).is_zero());
        assert!(TypedValue::Bool(Handle::new(false)).is_zero());
        assert!(TypedValue::Int64(Handle::new(0)).is_zero());
        assert!(TypedValue::Duration(Handle::default()).is_zero());

        assert!(!TypedValue::String(Handle::new("x".to_string())).is_zero());
        assert!(!TypedValue::Bool(Handle::new(true)).is_zero());
        assert!(!TypedValue::Int(Handle::new(-1)).is_zero());
        assert!(!TypedValue::Uint64(Handle::new(1)).is_zero());
    }

    #[test]
    fn only_strings_are_quoted() {
        assert!(TypedValue::String(Handle::default()).quoted());
        assert!(!TypedValue::Duration(Handle::default()).quoted());
    }
}

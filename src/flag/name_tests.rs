//! Tests for flag name specs.

use super::error::ArgsError;
use super::name::FlagName;

mod accepted {
    use super::*;

    fn parts(spec: &str) -> (Option<String>, Option<char>) {
        let name = FlagName::parse(spec).unwrap();
        (name.long().map(str::to_string), name.short())
    }

    #[test]
    fn long_only() {
        assert_eq!(parts("mode"), (Some("mode".to_string()), None));
    }

    #[test]
    fn short_only() {
        assert_eq!(parts("m"), (None, Some('m')));
    }

    #[test]
    fn long_then_short() {
        assert_eq!(parts("mode,m"), (Some("mode".to_string()), Some('m')));
    }

    #[test]
    fn short_then_long_is_order_independent() {
        assert_eq!(parts("m,mode"), parts("mode,m"));
    }

    #[test]
    fn dotted_and_dashed_long_names() {
        assert_eq!(parts("log.level").0.as_deref(), Some("log.level"));
        assert_eq!(parts("max-conns").0.as_deref(), Some("max-conns"));
    }

    #[test]
    fn non_ascii_letter_is_a_valid_short() {
        assert_eq!(parts("é"), (None, Some('é')));
    }

    #[test]
    fn from_str_matches_parse() {
        let parsed: FlagName = "port,p".parse().unwrap();
        assert_eq!(parsed, FlagName::parse("p,port").unwrap());
    }
}

mod rejected {
    use super::*;

    fn assert_invalid(spec: &str) {
        let result = FlagName::parse(spec);
        assert!(
            matches!(result, Err(ArgsError::InvalidName { .. })),
            "expected {spec:?} to be rejected, got {result:?}"
        );
    }

    #[test]
    fn leading_dash() {
        assert_invalid("-mode");
        assert_invalid("-x");
    }

    #[test]
    fn space_in_long() {
        assert_invalid("m ode");
        assert_invalid("a b");
    }

    #[test]
    fn equals_in_long() {
        assert_invalid("m=ode");
        assert_invalid("a=b");
    }

    #[test]
    fn three_parts() {
        assert_invalid("mode,m,apple");
    }

    #[test]
    fn same_short_in_both_positions() {
        assert_invalid("m,m");
    }

    #[test]
    fn dashed_short() {
        assert_invalid("mode,-m");
    }

    #[test]
    fn padded_short() {
        assert_invalid("mode,      m");
    }

    #[test]
    fn two_shorts() {
        assert_invalid("a,b");
    }

    #[test]
    fn digit_short() {
        assert_invalid("port,1");
    }

    #[test]
    fn empty_spec() {
        assert_invalid("");
        assert_invalid(",");
    }

    #[test]
    fn error_message_names_the_problem() {
        let err = FlagName::parse("-mode").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid flag name "-mode": long flag "-mode" begins with -"#
        );
    }
}

mod rendering {
    use super::*;

    #[test]
    fn primary_prefers_long() {
        assert_eq!(FlagName::parse("p,port").unwrap().primary(), "port");
        assert_eq!(FlagName::parse("p").unwrap().primary(), "p");
    }

    #[test]
    fn keys_list_long_then_short() {
        let keys: Vec<String> = FlagName::parse("p,port").unwrap().keys().collect();
        assert_eq!(keys, vec!["port".to_string(), "p".to_string()]);
    }

    #[test]
    fn display_uses_dash_prefixes() {
        assert_eq!(FlagName::parse("port,p").unwrap().to_string(), "-p, --port");
        assert_eq!(FlagName::parse("port").unwrap().to_string(), "--port");
        assert_eq!(FlagName::parse("p").unwrap().to_string(), "-p");
    }
}

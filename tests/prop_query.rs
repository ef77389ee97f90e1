use bson::{Bson, Document};
use proptest::prelude::*;
use query_lite::param::OptionKey;
use query_lite::{RawQuery, Schema};

fn field() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,8}".prop_filter("not a built-in", |s| !matches!(s.as_str(), "limit" | "page" | "sort" | "fields"))
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        .. proptest::test_runner::Config::default()
    })]

    #[test]
    fn prop_skip_is_limit_times_previous_pages(limit in 1i32..=100, page in 1i32..=30) {
        let schema = Schema::new([("limit", limit.to_string()), ("page", page.to_string())]);
        prop_assert!(schema.validate().is_ok());
        let cursor = schema.parse().cursor.unwrap();
        prop_assert_eq!(cursor.get_i32("limit").unwrap(), limit);
        prop_assert_eq!(cursor.get_i32("skip").unwrap(), limit * (page - 1));
    }

    #[test]
    fn prop_limit_out_of_range_is_rejected(limit in prop_oneof![-1000i64..1, 101i64..100_000]) {
        let err = Schema::new([("limit", limit.to_string())]).validate().unwrap_err();
        let expected = if limit < 1 { OptionKey::Min } else { OptionKey::Max };
        prop_assert_eq!(err.name, expected);
        prop_assert_eq!(err.param, "limit");
    }

    #[test]
    fn prop_sort_tokens_map_to_directions(tokens in proptest::collection::vec((field(), any::<bool>()), 1..6)) {
        let raw: Vec<String> = tokens.iter().map(|(f, desc)| if *desc { format!("-{f}") } else { f.clone() }).collect();
        let schema = Schema::new([("sort", raw.join(","))]);
        let cursor = schema.parse().cursor.unwrap();
        let sort = cursor.get_document("sort").unwrap();
        // last occurrence of a field wins, first position is kept
        let mut expected = Document::new();
        for (f, desc) in &tokens {
            expected.insert(f.clone(), Bson::Int32(if *desc { -1 } else { 1 }));
        }
        prop_assert_eq!(sort, &expected);
    }

    #[test]
    fn prop_parse_is_idempotent(pairs in proptest::collection::vec((field(), "[ -~]{0,12}"), 0..8)) {
        let schema = Schema::new(RawQuery::from(pairs));
        let _ = schema.validate();
        // Debug text, since NaN never compares equal
        prop_assert_eq!(format!("{:?}", schema.parse()), format!("{:?}", schema.parse()));
    }

    #[test]
    fn prop_plain_words_filter_by_equality(name in field(), value in "[a-z]{1,10}") {
        prop_assume!(!matches!(value.as_str(), "true" | "false"));
        let schema = Schema::new([(name.clone(), value.clone())]);
        prop_assert!(schema.validate().is_ok());
        let filter = schema.parse().filter.unwrap();
        prop_assert_eq!(filter.get_str(&name).unwrap(), value.as_str());
    }
}

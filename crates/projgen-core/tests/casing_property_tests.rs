use projgen_core::{decamelize, decamelize_keys};
use proptest::prelude::*;
use toml::{Table, Value};

proptest! {
    #[test]
    fn test_lowercase_keys_are_fixed_points(s in "[a-z0-9_-]*") {
        prop_assert_eq!(decamelize(&s, "-"), s);
    }

    #[test]
    fn test_output_has_no_ascii_uppercase(s in "[A-Za-z0-9]*") {
        let out = decamelize(&s, "-");
        prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
        // only separators are added
        prop_assert_eq!(out.replace('-', ""), s.to_lowercase());
    }

    #[test]
    fn test_transform_is_idempotent(keys in prop::collection::vec("[a-zA-Z]{1,12}", 0..6)) {
        let mut inner = Table::new();
        for (i, key) in keys.iter().enumerate() {
            inner.insert(key.clone(), Value::Integer(i as i64));
        }
        let tree = Value::Array(vec![Value::Table(inner)]);

        let once = decamelize_keys(&tree, "-");
        let twice = decamelize_keys(&once, "-");
        prop_assert_eq!(once, twice);
    }
}

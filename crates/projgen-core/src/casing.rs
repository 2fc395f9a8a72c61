//! Key-casing transform for generated configuration trees
//!
//! User options are written in camelCase (`includePattern`) while most tool
//! descriptors expect kebab-case (`include-pattern`). The transform walks a
//! TOML value tree and rewrites table keys only; scalar values and array
//! element order are never touched.

use toml::{Table, Value};

/// Split a camelCase word at case boundaries and lowercase it.
///
/// A separator is inserted between a lowercase letter or digit and a
/// following uppercase letter, and inside an uppercase run right before the
/// start of a capitalised word (`XMLHttpRequest` -> `xml-http-request`).
/// Existing separators are left as they are.
pub fn decamelize(input: &str, separator: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push_str(separator);
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Rewrite every table key in `value`, recursing through arrays and tables.
pub fn decamelize_keys(value: &Value, separator: &str) -> Value {
    match value {
        Value::Table(table) => Value::Table(decamelize_table(table, separator)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| decamelize_keys(item, separator))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// [`decamelize_keys`] for a table root.
///
/// When two keys collapse to the same spelling the later one wins.
pub fn decamelize_table(table: &Table, separator: &str) -> Table {
    table
        .iter()
        .map(|(key, value)| (decamelize(key, separator), decamelize_keys(value, separator)))
        .collect()
}

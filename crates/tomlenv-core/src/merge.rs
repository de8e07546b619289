//! Recursive deep merge of raw TOML mappings
//!
//! Combines the base document with an overlay under deterministic
//! precedence: where both sides hold tables the merge recurses, otherwise
//! the overlay value replaces the base value wholesale. There is no list
//! concatenation and no partial array merging.

use toml::{Table, Value};

/// Deep-merge `overlay` over `base`, returning a new mapping.
///
/// Keys present on only one side are carried through unchanged. The result
/// does not depend on mapping iteration order, and neither input is
/// mutated. Merging cannot fail; type conflicts between the documents are
/// deferred to validation.
pub fn deep_merge(base: &Table, overlay: &Table) -> Table {
    let mut merged = base.clone();
    for (key, overlay_value) in overlay {
        let value = match (merged.get(key), overlay_value) {
            (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
                Value::Table(deep_merge(base_table, overlay_table))
            }
            // Overlay wins at the leaf level, including table-vs-scalar
            // conflicts, which validation reports later.
            _ => overlay_value.clone(),
        };
        merged.insert(key.clone(), value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(s: &str) -> Table {
        s.parse().unwrap()
    }

    #[test]
    fn overlay_replaces_scalar_values() {
        let base = table("a = 1\nb = 2");
        let overlay = table("b = 3\nc = 4");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, table("a = 1\nb = 3\nc = 4"));
    }

    #[test]
    fn nested_tables_merge_recursively() {
        let base = table("a = 1\n[b]\nx = 1\ny = 2");
        let overlay = table("c = 5\n[b]\ny = 3\nz = 4");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, table("a = 1\nc = 5\n[b]\nx = 1\ny = 3\nz = 4"));
    }

    #[test]
    fn arrays_are_replaced_not_concatenated() {
        let base = table("items = [1, 2, 3]");
        let overlay = table("items = [4]");
        let merged = deep_merge(&base, &overlay);
        assert_eq!(merged, table("items = [4]"));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = table("a = 1");
        let overlay = table("b = 2");
        deep_merge(&base, &overlay);
        assert_eq!(base, table("a = 1"));
        assert_eq!(overlay, table("b = 2"));
    }
}

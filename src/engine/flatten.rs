//! Flattening of nested tag values into dotted scalar keys.

use std::collections::BTreeMap;

use crate::models::value::{Scalar, TagValue};

/// Nesting depth beyond which composite fields are dropped.
const MAX_DEPTH: usize = 32;

/// Flattens a tag's value into a map of dotted keys to scalars.
///
/// A scalar value yields a single entry keyed by the tag name itself. A
/// composite value yields one entry per leaf field, keyed by the `.`-joined
/// path from the tag name down, e.g. `Motor_Status_UDT.Running`. The same
/// value always flattens to the same key set.
pub fn flatten(tag_name: &str, value: &TagValue) -> BTreeMap<String, Scalar> {
    let mut out = BTreeMap::new();
    flatten_into(tag_name, value, 0, &mut out);
    out
}

fn flatten_into(path: &str, value: &TagValue, depth: usize, out: &mut BTreeMap<String, Scalar>) {
    match value {
        TagValue::Scalar(scalar) => {
            out.insert(path.to_string(), scalar.clone());
        }
        TagValue::Composite(fields) => {
            if depth >= MAX_DEPTH {
                tracing::warn!(key = %path, "Composite nesting exceeds depth cap, dropping subtree");
                return;
            }
            for (field, nested) in fields {
                flatten_into(&format!("{}.{}", path, field), nested, depth + 1, out);
            }
        }
    }
}

//! Deep merge of vars mappings
//!
//! - Mappings: merged key by key, recursively
//! - Sequences: REPLACED by the overlay, never concatenated
//! - Scalars and null: the overlay wins

use serde_yaml::Value;
use vars_fs::VarsMapping;

/// Merge `overlay` on top of `base`, returning a new mapping.
///
/// Neither input is modified. Keys present only in `base` are kept, keys
/// present only in `overlay` are added, and conflicting keys take the
/// overlay's value unless both sides are mappings.
pub fn merge(base: &VarsMapping, overlay: &VarsMapping) -> VarsMapping {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

/// In-place form of [`merge`].
pub fn merge_into(base: &mut VarsMapping, overlay: &VarsMapping) {
    for (key, overlay_value) in overlay {
        if let Some(slot) = base.get_mut(key) {
            match (slot, overlay_value) {
                (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
                    merge_into(base_map, overlay_map);
                }
                (slot, _) => *slot = overlay_value.clone(),
            }
        } else {
            base.insert(key.clone(), overlay_value.clone());
        }
    }
}

/// Left-fold [`merge`] over `layers`, later layers taking precedence.
pub fn merge_all<'a, I>(layers: I) -> VarsMapping
where
    I: IntoIterator<Item = &'a VarsMapping>,
{
    layers.into_iter().fold(VarsMapping::new(), |mut acc, layer| {
        merge_into(&mut acc, layer);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> VarsMapping {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_nested_precedence() {
        let base = yaml("a: {x: 1, y: 2}");
        let overlay = yaml("a: {y: 3, z: 4}");
        assert_eq!(merge(&base, &overlay), yaml("a: {x: 1, y: 3, z: 4}"));
    }

    #[test]
    fn test_sequence_replace() {
        let base = yaml("a: [1, 2]");
        let overlay = yaml("a: [3]");
        assert_eq!(merge(&base, &overlay), yaml("a: [3]"));
    }

    #[test]
    fn test_null_overrides() {
        let base = yaml("a: {x: 1}");
        let overlay = yaml("a: null");
        assert_eq!(merge(&base, &overlay), yaml("a: null"));
    }

    #[test]
    fn test_scalar_replaced_by_mapping() {
        let base = yaml("a: 1");
        let overlay = yaml("a: {x: 1}");
        assert_eq!(merge(&base, &overlay), yaml("a: {x: 1}"));
    }

    #[test]
    fn test_inputs_untouched() {
        let base = yaml("a: {x: 1}");
        let overlay = yaml("a: {x: 2}");
        let _ = merge(&base, &overlay);
        assert_eq!(base, yaml("a: {x: 1}"));
        assert_eq!(overlay, yaml("a: {x: 2}"));
    }

    #[test]
    fn test_merge_all_later_wins() {
        let layers = [yaml("a: 1\nb: 1"), yaml("b: 2\nc: 2"), yaml("c: 3")];
        assert_eq!(merge_all(&layers), yaml("a: 1\nb: 2\nc: 3"));
    }

    #[test]
    fn test_base_key_order_is_kept() {
        let merged = merge(&yaml("z: 1\na: 1"), &yaml("m: 2\nz: 2"));
        let keys: Vec<_> = merged.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}

use toml::{Table, Value};

/// Deep-merge `overlay` into `base`.
///
/// Tables present on both sides merge recursively; any other overlay value
/// replaces the base value. Existing keys keep their position, new keys are
/// appended, so the order of a settings mapping survives every layer.
pub fn merge_into(base: &mut Table, overlay: Table) {
    for (key, overlay_val) in overlay {
        match (base.get_mut(&key), overlay_val) {
            (Some(Value::Table(base_tbl)), Value::Table(overlay_tbl)) => {
                merge_into(base_tbl, overlay_tbl);
            }
            (Some(existing), overlay_val) => *existing = overlay_val,
            (None, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
}

// Storage key encoding
//
// A row lives under "<table_name>:<primary_key_decimal>". All rows of a table
// therefore share the prefix "<table_name>:".

/// Separates the table name from the primary key
pub const KEY_SEPARATOR: u8 = b':';

/// Storage key of one row
pub fn row_key(table_name: &str, primary_key: &str) -> Vec<u8> {
    let mut key = table_prefix(table_name);
    key.extend_from_slice(primary_key.as_bytes());
    key
}

/// Prefix shared by every key of a table
pub fn table_prefix(table_name: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(table_name.len() + 1);
    prefix.extend_from_slice(table_name.as_bytes());
    prefix.push(KEY_SEPARATOR);
    prefix
}

/// `[lower, upper)` bounds covering exactly one table's key space.
///
/// The upper bound is the prefix with its last byte incremented. The last
/// byte is always the separator, so the increment cannot overflow.
pub fn table_key_range(table_name: &str) -> (Vec<u8>, Vec<u8>) {
    let lower = table_prefix(table_name);
    let mut upper = lower.clone();
    if let Some(last) = upper.last_mut() {
        *last += 1;
    }
    (lower, upper)
}

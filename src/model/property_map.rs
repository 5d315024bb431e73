//! PropertyMap: the open key-value store on nodes and edges.

use std::collections::HashMap;
use super::Value;

/// A map of property names to values.
pub type PropertyMap = HashMap<String, Value>;

/// Convert iterator of (key, value) pairs into a map value.
impl<K, V> From<Vec<(K, V)>> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        Value::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// First key in `keys` holding a non-empty string.
pub fn first_nonempty_str<'a>(props: &'a PropertyMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| props.get(*k).and_then(Value::as_nonempty_str))
}

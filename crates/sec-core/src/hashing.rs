//! Hashing y canonicalización JSON para digests de secuencias.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Serializa un `Value` en forma canónica (claves de objeto ordenadas)
/// para que el digest no dependa del orden de inserción.
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap_or_default(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let mut tree = BTreeMap::new();
            for (k, v) in map {
                tree.insert(k, to_canonical_json(v));
            }
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| {
                                             format!("{}:{}", serde_json::to_string(&k).unwrap_or_default(), v)
                                         })
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Sha256::new();
    h.update(input.as_bytes());
    hex_lower(&h.finalize())
}

/// Hashea un `Value` sobre su forma canónica.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

fn hex_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

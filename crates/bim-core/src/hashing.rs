//! Canonicalización JSON y hashing de huellas.
//!
//! La huella de un lote confirmado se calcula sobre una forma canónica del
//! input: claves de objeto ordenadas, sin espacios, números tal como los
//! serializa serde_json. Mismo input, misma huella, en cualquier orden de
//! inserción de las claves.

use blake3::Hasher;
use serde_json::Value;

/// Serializa un `Value` a su forma canónica determinista.
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(to_canonical_json).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let inner: Vec<String> = keys
                .into_iter()
                .map(|k| {
                    format!(
                        "{}:{}",
                        serde_json::to_string(k).unwrap(),
                        to_canonical_json(&map[k])
                    )
                })
                .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}

/// Hash hex de un string.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hash hex de la forma canónica de un `Value`.
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonico_ordena_claves() {
        let a = json!({"b": 1, "a": [true, null]});
        let b = json!({"a": [true, null], "b": 1});
        assert_eq!(to_canonical_json(&a), "{\"a\":[true,null],\"b\":1}");
        assert_eq!(hash_value(&a), hash_value(&b));
    }

    #[test]
    fn test_inputs_distintos_hashes_distintos() {
        let a = json!({"label": "Copy Parameters", "targets": [1, 2]});
        let b = json!({"label": "Copy Parameters", "targets": [1, 3]});
        assert_ne!(hash_value(&a), hash_value(&b));
    }
}

//! Snapshot codec: `CounterTable` <-> JSON object bytes.
//!
//! The on-disk format is a single flat JSON object mapping counter name to
//! integer value, e.g. `{"visitas": 42, "descargas": 7}`. There is no version
//! field or schema tag.
//!
//! Decoding rules:
//! - the document must be an object whose values are all JSON integers,
//!   otherwise the whole document is rejected;
//! - negative integers are dropped (the counter reads as 0 again) and logged.

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::{Result, TallyError};
use crate::table::CounterTable;

/// Serialize the whole table.
pub fn encode(table: &CounterTable) -> Result<Bytes> {
    serde_json::to_vec(table)
        .map(Bytes::from)
        .map_err(|e| TallyError::Snapshot(format!("encode failed: {e}")))
}

/// Parse snapshot bytes into a table.
pub fn decode(bytes: &[u8]) -> Result<CounterTable> {
    let obj: Map<String, Value> = serde_json::from_slice(bytes)
        .map_err(|e| TallyError::Snapshot(format!("invalid snapshot json: {e}")))?;

    let mut entries = Vec::with_capacity(obj.len());
    for (name, value) in obj {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    entries.push((name, v));
                } else if n.is_i64() {
                    tracing::warn!(counter=%name, value=%n, "dropping negative counter from snapshot");
                } else {
                    return Err(TallyError::Snapshot(format!(
                        "counter {name} is not an integer: {n}"
                    )));
                }
            }
            other => {
                return Err(TallyError::Snapshot(format!(
                    "counter {name} is not a number: {other}"
                )));
            }
        }
    }

    Ok(entries.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_keeps_values() {
        let mut t = CounterTable::new();
        t.increment("visitas");
        t.increment("visitas");
        t.increment("descargas");

        let bytes = encode(&t).unwrap();
        assert_eq!(decode(&bytes).unwrap(), t);
    }

    #[test]
    fn empty_table_encodes_as_empty_object() {
        let bytes = encode(&CounterTable::new()).unwrap();
        assert_eq!(&bytes[..], b"{}");
    }
}

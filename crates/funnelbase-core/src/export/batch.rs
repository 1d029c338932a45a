//! Newline-delimited JSON batch encoding.
//!
//! Batches are built entirely in memory. The reference behavior wrote one
//! temporary file per object type and could leak it on failure paths; an
//! in-memory buffer has nothing to leak.

use crate::error::SyncResult;
use serde::Serialize;

/// Encodes records as newline-delimited JSON: one object per line, each line
/// terminated by `\n`.
pub fn to_ndjson<T: Serialize>(records: &[T]) -> SyncResult<Vec<u8>> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record)?;
        buf.push(b'\n');
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn round_trips_n_records() {
        let records = vec![
            json!({"objectId": "1", "name": "a"}),
            json!({"objectId": "2", "name": "b"}),
            json!({"objectId": "3", "name": "c"}),
        ];
        let payload = to_ndjson(&records).unwrap();
        let text = String::from_utf8(payload).unwrap();

        let parsed: Vec<Value> =
            text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(parsed, records);
    }

    #[test]
    fn empty_batch_is_empty_payload() {
        let payload = to_ndjson::<Value>(&[]).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn every_line_is_newline_terminated() {
        let records = vec![json!({"objectId": "1"})];
        let payload = to_ndjson(&records).unwrap();
        assert_eq!(payload.last(), Some(&b'\n'));
    }
}

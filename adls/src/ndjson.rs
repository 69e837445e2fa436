//! Newline-delimited JSON encoding for record batches.

use serde::Serialize;

use lakeload_core::{Error, Result};

/// Encode `records` as newline-delimited JSON.
///
/// Each record becomes one compact JSON document followed by exactly one
/// `\n`, the last one included, so the payload is directly readable by
/// streaming parsers. Compact serialization never emits raw newlines or
/// carriage returns inside a document. An empty batch encodes to an empty
/// payload. Insertion order is preserved.
pub fn to_ndjson<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(records.len() * 128);

    for record in records {
        serde_json::to_writer(&mut buf, record).map_err(|e| {
            Error::serialization("record is not representable as JSON").with_source(e)
        })?;
        buf.push(b'\n');
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use lakeload_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_one_line_per_record_in_order() {
        let records = vec![
            json!({"seq": 1, "body": "first"}),
            json!({"seq": 2, "body": "second"}),
            json!({"seq": 3, "body": "third"}),
        ];

        let payload = to_ndjson(&records).unwrap();
        let text = std::str::from_utf8(&payload).unwrap();

        assert!(text.ends_with('\n'));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for (line, record) in lines.iter().zip(&records) {
            assert_eq!(&serde_json::from_str::<Value>(line).unwrap(), record);
        }
    }

    #[test]
    fn test_empty_batch_encodes_to_empty_payload() {
        let payload = to_ndjson::<Value>(&[]).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_no_raw_newlines_inside_documents() {
        let records = vec![json!({"body": "line one\nline two\r\n"})];
        let payload = to_ndjson(&records).unwrap();

        // The embedded newlines are escaped; the single real `\n` is the
        // record separator.
        assert_eq!(payload.iter().filter(|b| **b == b'\n').count(), 1);
        assert!(!payload.windows(2).any(|w| w == b"\r\n"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let records = vec![
            json!({"device": "sensor-1", "reading": 21.5, "tags": ["a", "b"]}),
            json!({"device": "sensor-2", "reading": null}),
        ];

        let payload = to_ndjson(&records).unwrap();
        let decoded: Vec<Value> = std::str::from_utf8(&payload)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(decoded, records);
    }

    #[test]
    fn test_length_counts_encoded_bytes_not_chars() {
        let records = vec![json!("héllo")];
        let payload = to_ndjson(&records).unwrap();

        // "héllo" is 5 chars but 6 bytes in UTF-8; plus quotes and the
        // separator. No byte-order mark anywhere.
        assert_eq!(payload.len(), 9);
        assert_ne!(&payload[..3], b"\xef\xbb\xbf");
    }

    #[test]
    fn test_unrepresentable_record_fails_with_serialization_error() {
        // JSON object keys must be strings; a byte-sequence key cannot be
        // represented.
        let records = vec![std::collections::BTreeMap::from([(vec![0u8, 1], 7u32)])];
        let err = to_ndjson(&records).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}

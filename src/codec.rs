//! Encoding and decoding of payloads for each resolved format

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::format::Format;

/// One row of delimiter-separated data. Insertion order is preserved, so the
/// header row derived from the first record keeps the caller's column order.
pub type Record = IndexMap<String, String>;

/// In-memory value accepted by `upload` and produced by `download`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Ordered rows of string key/value mappings (csv, tsv)
    Records(Vec<Record>),
    /// Arbitrary JSON value (json)
    Json(Value),
    /// Raw text (txt)
    Text(String),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Self::Records(_) => "records",
            Self::Json(_) => "json",
            Self::Text(_) => "text",
        }
    }
}

impl From<Vec<Record>> for Payload {
    fn from(records: Vec<Record>) -> Self {
        Self::Records(records)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Serialize a payload to the byte representation of `format`.
///
/// Csv/tsv require a [`Payload::Records`] value; json serializes any payload
/// variant as JSON text; text requires [`Payload::Text`].
pub fn encode(payload: &Payload, format: Format) -> StoreResult<Vec<u8>> {
    match format {
        Format::Csv => encode_records(payload, format, b','),
        Format::Tsv => encode_records(payload, format, b'\t'),
        Format::Json => {
            serde_json::to_vec(payload).map_err(|e| StoreError::encode(format, e.to_string()))
        }
        Format::Text => match payload {
            Payload::Text(text) => Ok(text.clone().into_bytes()),
            other => Err(StoreError::encode(
                format,
                format!("expected a text payload, got {}", other.kind()),
            )),
        },
    }
}

/// Parse bytes in `format` back into a payload, the inverse of [`encode`].
pub fn decode(bytes: &[u8], format: Format) -> StoreResult<Payload> {
    match format {
        Format::Csv => decode_records(bytes, format, b','),
        Format::Tsv => decode_records(bytes, format, b'\t'),
        Format::Json => serde_json::from_slice(bytes)
            .map(Payload::Json)
            .map_err(|e| StoreError::decode(format, e.to_string())),
        Format::Text => String::from_utf8(bytes.to_vec())
            .map(Payload::Text)
            .map_err(|e| StoreError::decode(format, e.to_string())),
    }
}

fn encode_records(payload: &Payload, format: Format, delimiter: u8) -> StoreResult<Vec<u8>> {
    let records = match payload {
        Payload::Records(records) => records,
        other => {
            return Err(StoreError::encode(
                format,
                format!("expected a record payload, got {}", other.kind()),
            ))
        }
    };

    // An empty record set has no header to derive; it encodes to nothing.
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };

    let header: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer
        .write_record(&header)
        .map_err(|e| StoreError::encode(format, e.to_string()))?;
    for record in records {
        let row = header
            .iter()
            .map(|column| record.get(*column).map(String::as_str).unwrap_or(""));
        writer
            .write_record(row)
            .map_err(|e| StoreError::encode(format, e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::encode(format, e.to_string()))
}

fn decode_records(bytes: &[u8], format: Format, delimiter: u8) -> StoreResult<Payload> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::decode(format, e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        // The reader is strict by default: rows whose field count differs
        // from the header fail here instead of being padded or truncated.
        let row = row.map_err(|e| StoreError::decode(format, e.to_string()))?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect::<Record>(),
        );
    }

    Ok(Payload::Records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn csv_round_trip_preserves_rows_and_column_order() {
        let rows = vec![
            record(&[("x", "1"), ("y", "2")]),
            record(&[("x", "3"), ("y", "4")]),
        ];
        let payload = Payload::Records(rows);

        let bytes = encode(&payload, Format::Csv).unwrap();
        assert_eq!(String::from_utf8(bytes.clone()).unwrap(), "x,y\n1,2\n3,4\n");
        assert_eq!(decode(&bytes, Format::Csv).unwrap(), payload);
    }

    #[test]
    fn tsv_round_trip() {
        let payload = Payload::Records(vec![record(&[("name", "ada"), ("year", "1815")])]);
        let bytes = encode(&payload, Format::Tsv).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "name\tyear\nada\t1815\n"
        );
        assert_eq!(decode(&bytes, Format::Tsv).unwrap(), payload);
    }

    #[test]
    fn csv_values_containing_the_delimiter_are_quoted() {
        let payload = Payload::Records(vec![record(&[("note", "a,b"), ("ok", "yes")])]);
        let bytes = encode(&payload, Format::Csv).unwrap();
        assert_eq!(decode(&bytes, Format::Csv).unwrap(), payload);
    }

    #[test]
    fn missing_keys_encode_as_empty_strings() {
        let rows = vec![record(&[("x", "1"), ("y", "2")]), record(&[("x", "3")])];
        let bytes = encode(&Payload::Records(rows), Format::Csv).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "x,y\n1,2\n3,\n");
    }

    #[test]
    fn empty_record_set_round_trips_through_empty_bytes() {
        let bytes = encode(&Payload::Records(Vec::new()), Format::Csv).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(
            decode(&bytes, Format::Csv).unwrap(),
            Payload::Records(Vec::new())
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = decode(b"x,y\n1,2\n3\n", Format::Csv).unwrap_err();
        assert!(matches!(err, StoreError::Decode { format: Format::Csv, .. }));
    }

    #[test]
    fn json_round_trip() {
        let payload = Payload::Json(json!({"a": [1, 2, 3], "b": null}));
        let bytes = encode(&payload, Format::Json).unwrap();
        assert_eq!(decode(&bytes, Format::Json).unwrap(), payload);
    }

    #[test]
    fn json_format_accepts_record_payloads() {
        let payload = Payload::Records(vec![record(&[("x", "1")])]);
        let bytes = encode(&payload, Format::Json).unwrap();
        assert_eq!(
            decode(&bytes, Format::Json).unwrap(),
            Payload::Json(json!([{"x": "1"}]))
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = decode(b"{not json", Format::Json).unwrap_err();
        assert!(matches!(err, StoreError::Decode { format: Format::Json, .. }));
    }

    #[test]
    fn text_passes_through_unchanged() {
        let payload = Payload::Text("plain text\nwith lines".to_string());
        let bytes = encode(&payload, Format::Text).unwrap();
        assert_eq!(bytes, b"plain text\nwith lines");
        assert_eq!(decode(&bytes, Format::Text).unwrap(), payload);
    }

    #[test]
    fn invalid_utf8_text_is_rejected() {
        let err = decode(&[0xff, 0xfe], Format::Text).unwrap_err();
        assert!(matches!(err, StoreError::Decode { format: Format::Text, .. }));
    }

    #[test]
    fn payload_format_mismatch_fails_encode() {
        let err = encode(&Payload::Text("hi".into()), Format::Csv).unwrap_err();
        assert!(matches!(err, StoreError::Encode { format: Format::Csv, .. }));

        let err = encode(&Payload::Records(Vec::new()), Format::Text).unwrap_err();
        assert!(matches!(err, StoreError::Encode { format: Format::Text, .. }));
    }
}

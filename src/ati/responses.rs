//! Decoded API responses.
//!
//! JSON replies are decoded into `serde_json::Value` batches; the other
//! formats pass through as text. The typed reply structs cover the two
//! scalar routes (row count, max date) and the provider's inline error
//! payload, which arrives with a 2xx status.

use crate::ati::format::ResponseFormat;
use crate::error::{ApiError, Result};
use chrono::NaiveDateTime;
use serde_derive::Deserialize;
use serde_json::Value;

/// Timestamp layout in `getmaxdate` replies.
const MAXDATE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// One decoded API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBatch {
    /// Decoded JSON body
    Json(Value),
    /// Pass-through body for html, xml and csv
    Text(String),
}

impl ResponseBatch {
    /// Decodes a raw body according to the format it was requested in.
    pub fn decode(format: ResponseFormat, body: String) -> Result<Self, ApiError> {
        match format {
            ResponseFormat::Json => {
                let value: Value = serde_json::from_str(&body)
                    .map_err(|err| ApiError::decode("json", err))?;
                Ok(Self::Json(value))
            }
            _ => Ok(Self::Text(body)),
        }
    }

    /// Number of data records in this batch, when it can be known.
    ///
    /// Only a JSON `getdata` reply exposes its records (`DataFeed.Rows`);
    /// pass-through text has no countable structure.
    pub fn record_count(&self) -> Option<usize> {
        match self {
            Self::Json(value) => value
                .get("DataFeed")
                .and_then(|feed| feed.get("Rows"))
                .and_then(Value::as_array)
                .map(Vec::len),
            Self::Text(_) => None,
        }
    }

    /// Borrows the decoded JSON value, if this is a JSON batch.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Borrows the raw text, if this is a pass-through batch.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }
}

/// Rejects a 2xx reply that carries the provider's inline error payload.
///
/// The provider reports query-level failures in the body (`ErrorCode` /
/// `ErrorMessage`) while still returning a success status.
pub fn reject_error_reply(value: &Value) -> Result<(), ApiError> {
    match value.get("ErrorCode") {
        Some(code) if !code.is_null() => {
            let message = value
                .get("ErrorMessage")
                .and_then(Value::as_str)
                .unwrap_or("no error message");
            Err(ApiError::decode(
                "json",
                format!("provider error {}: {}", code, message),
            ))
        }
        _ => Ok(()),
    }
}

/// `getrowcount` reply: `{"RowCounts":[{"RowCount":"250"}]}`.
#[derive(Debug, Deserialize)]
pub struct RowCountReply {
    #[serde(rename = "RowCounts")]
    row_counts: Vec<RowCountEntry>,
}

#[derive(Debug, Deserialize)]
struct RowCountEntry {
    // The provider has been seen sending both "250" and 250
    #[serde(rename = "RowCount")]
    row_count: Value,
}

impl RowCountReply {
    /// Parses the reply body and extracts the total row count.
    pub fn parse(body: &str) -> Result<u64, ApiError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| ApiError::decode("json", err))?;
        reject_error_reply(&value)?;
        let reply: Self =
            serde_json::from_value(value).map_err(|err| ApiError::decode("json", err))?;
        let entry = reply
            .row_counts
            .first()
            .ok_or_else(|| ApiError::decode("json", "RowCounts is empty"))?;
        match &entry.row_count {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| ApiError::decode("json", "RowCount is not a non-negative integer")),
            Value::String(s) => s
                .parse::<u64>()
                .map_err(|err| ApiError::decode("json", err)),
            other => Err(ApiError::decode(
                "json",
                format!("unexpected RowCount value: {}", other),
            )),
        }
    }
}

/// `getmaxdate` reply: `{"maxdate":"2020-01-01 12:34:56"}`.
#[derive(Debug, Deserialize)]
pub struct MaxDateReply {
    #[serde(rename = "maxdate")]
    max_date: String,
}

impl MaxDateReply {
    /// Parses the reply body and extracts the max-date timestamp.
    pub fn parse(body: &str) -> Result<NaiveDateTime, ApiError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| ApiError::decode("json", err))?;
        reject_error_reply(&value)?;
        let reply: Self =
            serde_json::from_value(value).map_err(|err| ApiError::decode("json", err))?;
        NaiveDateTime::parse_from_str(&reply.max_date, MAXDATE_LAYOUT)
            .map_err(|err| ApiError::decode("json", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_decode_json() {
        let batch =
            ResponseBatch::decode(ResponseFormat::Json, r#"{"DataFeed":{"Rows":[1,2]}}"#.into())
                .unwrap();
        assert_eq!(batch.record_count(), Some(2));
        assert!(batch.as_json().is_some());
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = ResponseBatch::decode(ResponseFormat::Json, "<html></html>".into()).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_decode_passthrough_formats() {
        for format in [ResponseFormat::Html, ResponseFormat::Xml, ResponseFormat::Csv] {
            let batch = ResponseBatch::decode(format, "a;b;c".into()).unwrap();
            assert_eq!(batch.as_text(), Some("a;b;c"));
            assert_eq!(batch.record_count(), None);
        }
    }

    #[test]
    fn test_record_count_without_datafeed() {
        let batch = ResponseBatch::decode(ResponseFormat::Json, r#"{"maxdate":"x"}"#.into()).unwrap();
        assert_eq!(batch.record_count(), None);
    }

    #[test]
    fn test_row_count_from_string() {
        let rows = RowCountReply::parse(r#"{"RowCounts":[{"RowCount":"250"}]}"#).unwrap();
        assert_eq!(rows, 250);
    }

    #[test]
    fn test_row_count_from_number() {
        let rows = RowCountReply::parse(r#"{"RowCounts":[{"RowCount":250}]}"#).unwrap();
        assert_eq!(rows, 250);
    }

    #[test]
    fn test_row_count_rejects_error_reply() {
        let body = r#"{"ErrorCode":1001,"ErrorMessage":"space unknown"}"#;
        let err = RowCountReply::parse(body).unwrap_err();
        assert!(err.to_string().contains("provider error 1001"));
    }

    #[test]
    fn test_row_count_empty_list() {
        let err = RowCountReply::parse(r#"{"RowCounts":[]}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_max_date() {
        let parsed = MaxDateReply::parse(r#"{"maxdate":"2020-01-01 12:34:56"}"#).unwrap();
        assert_eq!(
            parsed,
            NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveTime::from_hms_opt(12, 34, 56).unwrap()
            )
        );
    }

    #[test]
    fn test_max_date_bad_layout() {
        let err = MaxDateReply::parse(r#"{"maxdate":"01/01/2020"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn test_null_error_code_is_not_an_error() {
        let value: Value = serde_json::from_str(r#"{"ErrorCode":null,"RowCounts":[]}"#).unwrap();
        assert!(reject_error_reply(&value).is_ok());
    }
}

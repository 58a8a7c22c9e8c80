use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// One past translation, as listed by the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryRecord {
    pub id: u64,
    #[serde(default)]
    pub user: Option<String>,
    pub ip: String,
    pub sql_in_len: usize,
    pub sql_out_len: usize,
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} user={} ip={} in={} out={}",
            self.id,
            self.user.as_deref().unwrap_or("-"),
            self.ip,
            self.sql_in_len,
            self.sql_out_len
        )
    }
}

pub fn parse(body: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
    Ok(serde_json::from_str(body)?)
}

/// Rejects non-2xx responses before looking at the body.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
    if !(200..300).contains(&status) {
        return Err(HistoryError::Status(status));
    }
    parse(body)
}

/// What the history panel shows: one record per line, or the failure.
pub fn describe(result: &Result<Vec<HistoryRecord>, HistoryError>) -> String {
    match result {
        Ok(records) => records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join("\n"),
        Err(e) => format!("Failed to load history: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        {"id": 7, "user": "ana", "ip": "10.0.0.1", "sql_in_len": 120, "sql_out_len": 98},
        {"id": 8, "user": null, "ip": "10.0.0.2", "sql_in_len": 5, "sql_out_len": 6},
        {"id": 9, "ip": "10.0.0.3", "sql_in_len": 0, "sql_out_len": 0}
    ]"#;

    #[test]
    fn test_describe_records() {
        let result = parse(BODY);
        assert_eq!(
            describe(&result),
            "#7 user=ana ip=10.0.0.1 in=120 out=98\n\
             #8 user=- ip=10.0.0.2 in=5 out=6\n\
             #9 user=- ip=10.0.0.3 in=0 out=0"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(describe(&parse("[]")), "");
    }

    #[test]
    fn test_bad_status() {
        let result = parse_response(502, BODY);
        assert!(matches!(result, Err(HistoryError::Status(502))));
        assert_eq!(describe(&result), "Failed to load history: HTTP 502");
    }

    #[test]
    fn test_ok_status() {
        let records = parse_response(200, BODY).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].user.as_deref(), Some("ana"));
    }

    #[test]
    fn test_malformed_body() {
        let result = parse_response(200, "{\"id\": 1}");
        assert!(matches!(result, Err(HistoryError::Json(_))));
        assert!(describe(&result).starts_with("Failed to load history: "));
    }
}

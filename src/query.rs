use crate::config::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::data_model::QueryFilter;
use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use serde_json::{json, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates one date bound. `is_start` only affects the error message.
pub fn validate_date(date: Option<&str>, is_start: bool) -> Result<()> {
    if let Some(d) = date {
        if NaiveDate::parse_from_str(d, DATE_FORMAT).is_err() {
            let which = if is_start { "start" } else { "end" };
            return Err(AnalysisError::Validation(format!(
                "Invalid {} date '{}'. Use the YYYY-MM-DD format",
                which, d
            )));
        }
    }
    Ok(())
}

/// Resolves the caller's requested limit against the configured defaults.
///
/// `None` falls back to `default_limit`; anything above `max_limit` is
/// rejected rather than silently clamped, so the caller learns the cap.
pub fn effective_limit(
    requested: Option<i64>,
    default_limit: usize,
    max_limit: usize,
) -> Result<usize> {
    match requested {
        None => Ok(default_limit),
        Some(n) if n <= 0 => Err(AnalysisError::Validation(format!(
            "limit must be positive, got {}",
            n
        ))),
        Some(n) if n as usize > max_limit => Err(AnalysisError::Validation(format!(
            "limit {} exceeds the maximum of {}",
            n, max_limit
        ))),
        Some(n) => Ok(n as usize),
    }
}

/// Builds a validated `QueryFilter` from raw caller input.
pub fn build_filter(
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: Option<i64>,
) -> Result<QueryFilter> {
    build_filter_with_limits(start_date, end_date, limit, DEFAULT_LIMIT, MAX_LIMIT)
}

pub fn build_filter_with_limits(
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: Option<i64>,
    default_limit: usize,
    max_limit: usize,
) -> Result<QueryFilter> {
    validate_date(start_date, true)?;
    validate_date(end_date, false)?;
    let max_results = effective_limit(limit, default_limit, max_limit)?;
    Ok(QueryFilter {
        start_date: start_date.map(str::to_string),
        end_date: end_date.map(str::to_string),
        max_results,
    })
}

/// Translates a filter's date window into an Elasticsearch query body.
///
/// No bounds means match-all. Bounds are inclusive: the start date is
/// widened to 00:00:00 and the end date to 23:59:59, so a single calendar
/// day selects the whole day.
pub fn build_query(filter: &QueryFilter) -> Value {
    if filter.start_date.is_none() && filter.end_date.is_none() {
        return json!({ "match_all": {} });
    }

    let mut range = serde_json::Map::new();
    if let Some(start) = &filter.start_date {
        range.insert("gte".to_string(), json!(format!("{}T00:00:00", start)));
    }
    if let Some(end) = &filter.end_date {
        range.insert("lte".to_string(), json!(format!("{}T23:59:59", end)));
    }

    json!({ "range": { "meta.created_at": Value::Object(range) } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_all_without_bounds() {
        let filter = build_filter(None, None, None).unwrap();
        assert_eq!(build_query(&filter), json!({ "match_all": {} }));
    }

    #[test]
    fn single_day_widens_to_full_day() {
        let filter = build_filter(Some("2024-03-14"), Some("2024-03-14"), None).unwrap();
        let query = build_query(&filter);
        assert_eq!(
            query["range"]["meta.created_at"]["gte"],
            json!("2024-03-14T00:00:00")
        );
        assert_eq!(
            query["range"]["meta.created_at"]["lte"],
            json!("2024-03-14T23:59:59")
        );
    }

    #[test]
    fn open_ended_start_only() {
        let filter = build_filter(Some("2024-03-14"), None, None).unwrap();
        let query = build_query(&filter);
        assert_eq!(
            query["range"]["meta.created_at"]["gte"],
            json!("2024-03-14T00:00:00")
        );
        assert!(query["range"]["meta.created_at"].get("lte").is_none());
    }

    #[test]
    fn rejects_malformed_start_date() {
        let err = build_filter(Some("not-a-date"), None, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("start"), "unexpected message: {}", msg);
        assert!(msg.contains("YYYY-MM-DD"), "unexpected message: {}", msg);
    }

    #[test]
    fn rejects_malformed_end_date() {
        let err = build_filter(None, Some("2024-13-40"), None).unwrap_err();
        assert!(err.to_string().contains("end"));
    }

    #[test]
    fn limit_defaults_and_caps() {
        assert_eq!(effective_limit(None, 100, 1000).unwrap(), 100);
        assert_eq!(effective_limit(Some(42), 100, 1000).unwrap(), 42);
        assert!(effective_limit(Some(0), 100, 1000).is_err());
        assert!(effective_limit(Some(-3), 100, 1000).is_err());
        assert!(effective_limit(Some(1001), 100, 1000).is_err());
        assert_eq!(effective_limit(Some(1000), 100, 1000).unwrap(), 1000);
    }
}

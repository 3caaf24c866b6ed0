use gloo::net::http::Request;
use shared::{Period, Record, ServiceError, REST_NAMESPACE};

/// API client for communicating with the backend server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client talking to the origin the page was served from
    pub fn new() -> Self {
        Self::with_base_url(base_from_origin(gloo::utils::window().location().origin().ok()))
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn data_url(&self, period: Period) -> String {
        format!(
            "{}{}/data?period={}",
            self.base_url,
            REST_NAMESPACE,
            period.as_query_value()
        )
    }

    pub fn logs_url(&self) -> String {
        format!("{}{}/logs", self.base_url, REST_NAMESPACE)
    }

    /// Records of the trailing window for `period`
    pub async fn get_window(&self, period: Period) -> Result<Vec<Record>, ServiceError> {
        let response = Request::get(&self.data_url(period))
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        parse_window(response.status(), response.ok(), &body)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Base URL for a page origin. Without one, requests use root-relative paths
fn base_from_origin(origin: Option<String>) -> String {
    match origin {
        Some(origin) if origin != "null" => origin,
        _ => String::new(),
    }
}

/// Turn a data endpoint response into records or the matching `ServiceError`
fn parse_window(status: u16, ok: bool, body: &str) -> Result<Vec<Record>, ServiceError> {
    if !ok {
        return Err(ServiceError::Status {
            status,
            body: body.to_string(),
        });
    }

    serde_json::from_str::<Vec<Record>>(body).map_err(|e| ServiceError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_data_url() {
        let client = ApiClient::with_base_url("http://localhost:3000".to_string());
        assert_eq!(
            client.data_url(Period::Last15Days),
            "http://localhost:3000/graph-widget/v1/data?period=15days"
        );
    }

    #[test]
    fn test_custom_base_url_drops_trailing_slash() {
        let client = ApiClient::with_base_url("https://example.org/".to_string());
        assert_eq!(client.logs_url(), "https://example.org/graph-widget/v1/logs");
    }

    #[test]
    fn test_page_origin_is_the_default_base() {
        let base = base_from_origin(Some("http://127.0.0.1:3000".to_string()));
        let client = ApiClient::with_base_url(base);
        assert_eq!(
            client.data_url(Period::Last7Days),
            "http://127.0.0.1:3000/graph-widget/v1/data?period=7days"
        );
    }

    #[test]
    fn test_missing_origin_uses_relative_paths() {
        for origin in [None, Some("null".to_string())] {
            let client = ApiClient::with_base_url(base_from_origin(origin));
            assert_eq!(client.data_url(Period::Last1Month), "/graph-widget/v1/data?period=1month");
        }
    }

    #[test]
    fn test_parse_window_ok() {
        let body = r#"[{"date":"2023-06-12","name":"php","students":200,"fees":2000}]"#;
        let records = parse_window(200, true, body).unwrap();
        assert_eq!(
            records,
            vec![Record::new(NaiveDate::from_ymd_opt(2023, 6, 12).unwrap(), "php", 200, 2000)]
        );
    }

    #[test]
    fn test_parse_window_empty_array() {
        assert_eq!(parse_window(200, true, "[]").unwrap(), Vec::<Record>::new());
    }

    #[test]
    fn test_parse_window_error_status() {
        let body = r#"{"error":"service_error","message":"storage error: disk"}"#;
        let err = parse_window(500, false, body).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Status {
                status: 500,
                body: body.to_string(),
            }
        );
    }

    #[test]
    fn test_parse_window_not_json() {
        let err = parse_window(200, true, "<html>critical error</html>").unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(_)));
    }

    #[test]
    fn test_parse_window_negative_count() {
        let body = r#"[{"date":"2023-06-12","name":"php","students":-1,"fees":2000}]"#;
        let err = parse_window(200, true, body).unwrap_err();
        assert!(matches!(err, ServiceError::Malformed(_)));
    }
}

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{Period, Record, REST_NAMESPACE};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for the data endpoint
#[derive(Debug, Deserialize)]
pub struct DataQuery {
    pub period: Option<String>,
}

/// Create a router for the graph data API
pub fn router() -> Router<AppState> {
    Router::new().route("/data", get(get_data))
}

/// Records of the requested trailing window, in stored order
async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Vec<Record>>, ApiError> {
    info!("GET {}/data - query: {:?}", REST_NAMESPACE, query);

    let raw = query
        .period
        .ok_or_else(|| ApiError::BadRequest("missing 'period' query parameter".to_string()))?;
    let period = raw.parse::<Period>().map_err(|e| {
        warn!("Rejected period value '{}'", raw);
        ApiError::BadRequest(format!("{}", e))
    })?;

    let records = state.data_window.get_window(period).await.map_err(|e| {
        error!("Failed to load window {}: {}", period, e);
        ApiError::from(e)
    })?;

    info!("Returning {} records for {}", records.len(), period);
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use crate::config::BackendConfig;
    use crate::{create_router, initialize_backend};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use shared::{ApiErrorBody, Record};
    use tower::ServiceExt;

    async fn get(uri: &str) -> Result<(StatusCode, Vec<u8>), Box<dyn std::error::Error>> {
        let config = BackendConfig::for_tests();
        let app_state = initialize_backend(&config).await?;
        let app = create_router(app_state, &config)?;

        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method(Method::GET)
                    .body(Body::empty())?,
            )
            .await?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, body.to_vec()))
    }

    #[tokio::test]
    async fn test_get_data_seven_days() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/graph-widget/v1/data?period=7days").await?;
        assert_eq!(status, StatusCode::OK);

        let records: Vec<Record> = serde_json::from_slice(&body)?;
        // reference 2023-06-19, cutoff 2023-06-12: nothing in the seed is older
        assert_eq!(records.len(), 32);
        assert_eq!(records[0].name, "php");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_data_wire_format() -> Result<(), Box<dyn std::error::Error>> {
        let (_, body) = get("/graph-widget/v1/data?period=1month").await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(
            json[0],
            serde_json::json!({"date": "2023-06-12", "name": "php", "students": 200, "fees": 2000})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_data_unknown_period() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = get("/graph-widget/v1/data?period=1year").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(error.error, "bad_request");
        assert!(error.message.contains("1year"));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_data_missing_period() -> Result<(), Box<dyn std::error::Error>> {
        let (status, _) = get("/graph-widget/v1/data").await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }
}

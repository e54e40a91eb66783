use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};

use super::AppState;
use super::error::ApiError;
use crate::error::Error;
use crate::orchestrator::SummaryItem;
use crate::report::{DEFAULT_REPORT_TITLE, ReportItem, render_report};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    query: String,
}

fn default_report_query() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default = "default_report_query")]
    query: String,
    #[serde(default)]
    items: Vec<ReportItem>,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            query: default_report_query(),
            items: Vec::new(),
        }
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Bodies are parsed leniently: anything that is not the expected JSON is
/// treated as an empty request.
fn parse_lenient<T: for<'de> Deserialize<'de> + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

#[instrument(skip_all)]
pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Vec<SummaryItem>>, ApiError> {
    let orchestrator = state.orchestrator()?;
    let request: SearchRequest = parse_lenient(&body);

    let items = orchestrator.run(&request.query).await?;
    info!(query = %request.query.trim(), items = items.len(), "Search complete");
    Ok(Json(items))
}

#[instrument(skip_all)]
pub async fn export(body: Bytes) -> Result<Response, ApiError> {
    let request: ExportRequest = parse_lenient(&body);
    if request.items.is_empty() {
        return Err(Error::InvalidInput("No items to export.".to_string()).into());
    }

    let pdf = render_report(&request.query, &request.items, Utc::now())?;
    info!(items = request.items.len(), bytes = pdf.len(), "Exported report");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=summary.pdf"),
        ],
        pdf,
    )
        .into_response())
}

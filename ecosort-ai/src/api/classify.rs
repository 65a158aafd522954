//! Classification API handlers
//!
//! POST /api/classify, GET /api/classify, POST /api/classify-openai

use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    types::{Classification, ClassificationStrategy, ClassificationTier, ImageSource},
    AppState,
};
use ecosort_common::ClassificationResult;

/// Upload size cap for POST /api/classify
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Multipart field carrying the image
const IMAGE_FIELD: &str = "image";

/// JSON request body naming an image by URL
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlRequest {
    pub image_url: String,
}

/// GET /api/classify response
#[derive(Debug, Serialize)]
pub struct ClassifyServiceStatus {
    pub status: String,
    /// Strategies in chain order
    pub models: Vec<String>,
    pub version: String,
}

/// POST /api/classify
///
/// Accepts either `multipart/form-data` with an `image` file field, or a
/// JSON body `{"imageUrl": "..."}` (http(s) or `data:` URL).
///
/// **Response:** the classification plus `source` (the tier that produced it)
///
/// **Errors:**
/// - 400 Bad Request: no image supplied, or unreadable request body
pub async fn classify_image(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<Classification>> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let image = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        image_from_multipart(multipart).await?
    } else {
        let Json(body) = Json::<ImageUrlRequest>::from_request(request, &state)
            .await
            .map_err(|_| ApiError::BadRequest("No image provided".to_string()))?;
        image_from_url(body.image_url)?
    };

    let classification = state.orchestrator.classify_with_provenance(&image).await;
    Ok(Json(classification))
}

async fn image_from_multipart(mut multipart: Multipart) -> ApiResult<ImageSource> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.is_empty() {
            break;
        }
        return Ok(ImageSource::from_bytes(data.to_vec(), content_type));
    }

    Err(ApiError::BadRequest("No image provided".to_string()))
}

fn image_from_url(url: String) -> ApiResult<ImageSource> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("No image provided".to_string()));
    }
    Ok(ImageSource::from_url(url))
}

/// GET /api/classify
pub async fn classify_status(State(state): State<AppState>) -> Json<ClassifyServiceStatus> {
    Json(ClassifyServiceStatus {
        status: "AI Classification API is running".to_string(),
        models: state
            .orchestrator
            .strategy_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/classify-openai
///
/// Runs the OpenAI vision strategy alone, without fallback.
///
/// **Errors:**
/// - 400 Bad Request: OpenAI key not configured, or no image URL
/// - 502 Bad Gateway: the OpenAI call or its reply failed
pub async fn classify_openai(
    State(state): State<AppState>,
    Json(body): Json<ImageUrlRequest>,
) -> ApiResult<Json<ClassificationResult>> {
    let Some(openai) = state.openai.as_ref() else {
        return Err(ApiError::BadRequest(
            "OpenAI API key not configured".to_string(),
        ));
    };

    let image = image_from_url(body.image_url)?;

    match openai.attempt_classify(&image).await {
        Ok(result) => {
            info!(
                tier = %ClassificationTier::OpenAi,
                item = %result.item_label,
                "Direct OpenAI classification complete"
            );
            Ok(Json(result))
        }
        Err(e) => {
            warn!(error = %e, "OpenAI classification error");
            *state.last_error.write().await = Some(e.to_string());
            Err(ApiError::BadGateway("Classification failed".to_string()))
        }
    }
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/api/classify", post(classify_image).get(classify_status))
        .route("/api/classify-openai", post(classify_openai))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

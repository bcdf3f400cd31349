//! Video service routes

use std::io;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::{TypedHeader, headers::Host};
use futures::{StreamExt, TryStreamExt, stream};
use serde_json::json;
use tokio_util::io::{ReaderStream, StreamReader};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{CreateVideoRequest, Video, VideoStatus},
    repositories::RegistryError,
    url::Origin,
};

/// Multipart field carrying the video payload
pub const DATA_FIELD: &str = "data";

/// Content type served when a video has none recorded
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Bytes buffered between the store and a download response
const DOWNLOAD_BUFFER_BYTES: usize = 64 * 1024;

/// Create the router for the video service
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/video", get(get_videos).post(create_video))
        .route(
            "/video/:id/data",
            get(download_video_data).post(upload_video_data),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "video-service",
        "videos": state.video_repository.len().await,
    }))
}

/// Get all videos
pub async fn get_videos(State(state): State<AppState>) -> Json<Vec<Video>> {
    Json(state.video_repository.list().await)
}

/// Register a new video
pub async fn create_video(
    State(state): State<AppState>,
    host: Option<TypedHeader<Host>>,
    Json(payload): Json<CreateVideoRequest>,
) -> ApiResult<Json<Video>> {
    let origin = Origin::resolve(&state.config, host.as_ref().map(|h| &h.0));
    let video = state
        .video_repository
        .create(payload, &origin)
        .await
        .map_err(|e| match e {
            RegistryError::IdOutOfRange(_) => ApiError::BadRequest(e.to_string()),
            RegistryError::IdsExhausted => {
                error!("Failed to register video: {}", e);
                ApiError::InternalServerError
            }
        })?;

    info!("Registered video {} at {}", video.id, video.data_url);

    Ok(Json(video))
}

/// Upload the payload of a video from the multipart `data` field
pub async fn upload_video_data(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    mut multipart: Multipart,
) -> ApiResult<Json<VideoStatus>> {
    let video = find_video(&state, id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(DATA_FIELD) {
            continue;
        }

        let reader = StreamReader::new(field.map_err(io::Error::other));
        futures::pin_mut!(reader);

        let written = state
            .video_store
            .save(video.id, &mut reader)
            .await
            .map_err(|e| {
                error!("Failed to store data for video {}: {}", video.id, e);
                ApiError::from(e)
            })?;

        info!("Stored {} bytes for video {}", written, video.id);

        return Ok(Json(VideoStatus::ready()));
    }

    Err(ApiError::BadRequest(format!(
        "Missing required '{}' field",
        DATA_FIELD
    )))
}

/// Download the payload of a video with its recorded content type
///
/// The payload is streamed from the store. Failures before the first byte
/// answer 404; a failure after that truncates the body.
pub async fn download_video_data(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> ApiResult<Response> {
    let video = find_video(&state, id).await?;
    let no_data = || ApiError::NotFound(format!("No data for video {}", video.id));

    match state.video_store.has_data(video.id).await {
        Ok(true) => {}
        Ok(false) => return Err(no_data()),
        Err(e) => {
            warn!("Failed to look up data for video {}: {}", video.id, e);
            return Err(no_data());
        }
    }

    let (mut writer, reader) = tokio::io::duplex(DOWNLOAD_BUFFER_BYTES);
    let store = state.video_store.clone();
    let video_id = video.id;
    let copy_task = tokio::spawn(async move {
        let result = store.copy(video_id, &mut writer).await;
        if let Err(e) = &result {
            warn!("Failed to read data for video {}: {}", video_id, e);
        }
        result
    });

    let mut chunks = ReaderStream::new(reader);
    let first = match chunks.next().await {
        Some(Ok(chunk)) => chunk,
        Some(Err(_)) => return Err(no_data()),
        // The copy ended without writing anything
        None => match copy_task.await {
            Ok(Ok(_)) => Bytes::new(),
            Ok(Err(_)) => return Err(no_data()),
            Err(e) => {
                error!("Download task for video {} failed: {}", video_id, e);
                return Err(ApiError::InternalServerError);
            }
        },
    };

    let body = Body::from_stream(stream::once(async move { Ok(first) }).chain(chunks));
    let headers = [(header::CONTENT_TYPE, content_type_header(&video.content_type))];

    Ok((headers, body).into_response())
}

async fn find_video(state: &AppState, id: u64) -> ApiResult<Video> {
    state
        .video_repository
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Video {} not found", id)))
}

fn content_type_header(content_type: &str) -> HeaderValue {
    if content_type.is_empty() {
        return HeaderValue::from_static(DEFAULT_CONTENT_TYPE);
    }

    HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE))
}

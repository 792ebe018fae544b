/// Video info lookup
use crate::error::{Result, ServerError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tubecast_core::{VideoId, VideoInfo};

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub id: Option<String>,
}

/// GET /api/youtube/info?id=<id>
///
/// A malformed id is reported like a failed lookup, without calling the
/// provider.
pub async fn video_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<VideoInfo>> {
    let raw = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ServerError::MissingVideoId)?;

    let id = VideoId::parse(raw)?;
    tracing::debug!(video_id = %id, "Looking up video info");

    let info = state.resolver.resolve(&id).await?;
    Ok(Json(info))
}

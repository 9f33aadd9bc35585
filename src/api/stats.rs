//! Statistics endpoints

use axum::{
    extract::State,
    Json,
};

use crate::{
    error::AppResult,
    models::{FieldStats, NumericField},
    AppState,
};

use super::PathParam;

/// Min, max and average of a numeric field
#[utoipa::path(
    get,
    path = "/books/stats/{field}",
    tag = "stats",
    params(("field" = String, Path, description = "One of year, pages, rating")),
    responses(
        (status = 200, description = "Field statistics", body = FieldStats),
        (status = 400, description = "Unknown field", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_field_stats(
    State(state): State<AppState>,
    PathParam(field): PathParam<String>,
) -> AppResult<Json<FieldStats>> {
    let field: NumericField = field.parse()?;
    let stats = state.services.stats.field_stats(field).await;
    Ok(Json(stats))
}

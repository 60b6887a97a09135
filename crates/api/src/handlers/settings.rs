//! Handlers for index settings management.
//!
//! Updates and reset are forwarded as asynchronous engine tasks: the
//! response carries the task id, not the outcome. The snapshot read is
//! fault tolerant per category.

use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use meilgate_core::settings::{SettingResponse, SettingsSnapshot, SettingsUpdateRequest};
use meilgate_meili::api::MeiliApi;
use meilgate_meili::settings::SettingCategory;
use serde::de::DeserializeOwned;
use serde_json::Map;

use crate::error::{AppError, SettingsResult};
use crate::state::AppState;

type UpdateBody = Result<Json<SettingsUpdateRequest>, JsonRejection>;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// GET /api/v1/settings/
///
/// Read all eight setting categories. A category that fails to load is
/// logged and returned empty; the request itself still succeeds.
pub async fn get_settings(State(state): State<AppState>) -> SettingsResult<Json<SettingsSnapshot>> {
    let index_uid = state.index_uid()?;
    let meili = state.meili.as_ref();

    let (
        searchable_attributes,
        filterable_attributes,
        sortable_attributes,
        ranking_rules,
        displayed_attributes,
        stop_words,
        synonyms,
        typo_tolerance,
    ) = tokio::join!(
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::SearchableAttributes),
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::FilterableAttributes),
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::SortableAttributes),
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::RankingRules),
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::DisplayedAttributes),
        read_or_default::<Vec<String>>(meili, index_uid, SettingCategory::StopWords),
        read_or_default::<BTreeMap<_, _>>(meili, index_uid, SettingCategory::Synonyms),
        read_or_default::<Map<_, _>>(meili, index_uid, SettingCategory::TypoTolerance),
    );

    Ok(Json(SettingsSnapshot {
        searchable_attributes,
        filterable_attributes,
        sortable_attributes,
        ranking_rules,
        displayed_attributes,
        stop_words,
        synonyms,
        typo_tolerance,
    }))
}

async fn read_or_default<T: DeserializeOwned + Default>(
    meili: &MeiliApi,
    index_uid: &str,
    category: SettingCategory,
) -> T {
    match meili.get_setting::<T>(index_uid, category).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(%category, error = %e, "Failed to read index setting, using empty default");
            T::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// PUT /api/v1/settings/searchable-attributes
///
/// Attributes listed in `weights` are sent as `name:weight`.
pub async fn update_searchable_attributes(
    State(state): State<AppState>,
    body: UpdateBody,
) -> SettingsResult<Json<SettingResponse>> {
    let Json(req) = body?;
    let index_uid = state.index_uid()?;
    let attributes = req.weighted_searchable_attributes()?;

    submit_update(
        &state,
        index_uid,
        SettingCategory::SearchableAttributes,
        &attributes,
        "searchable attributes updated",
    )
    .await
}

/// PUT /api/v1/settings/filterable-attributes
pub async fn update_filterable_attributes(
    State(state): State<AppState>,
    body: UpdateBody,
) -> SettingsResult<Json<SettingResponse>> {
    let Json(req) = body?;
    let index_uid = state.index_uid()?;

    submit_update(
        &state,
        index_uid,
        SettingCategory::FilterableAttributes,
        req.filterable_attributes()?,
        "filterable attributes updated",
    )
    .await
}

/// PUT /api/v1/settings/sortable-attributes
pub async fn update_sortable_attributes(
    State(state): State<AppState>,
    body: UpdateBody,
) -> SettingsResult<Json<SettingResponse>> {
    let Json(req) = body?;
    let index_uid = state.index_uid()?;

    submit_update(
        &state,
        index_uid,
        SettingCategory::SortableAttributes,
        req.sortable_attributes()?,
        "sortable attributes updated",
    )
    .await
}

/// PUT /api/v1/settings/ranking-rules
pub async fn update_ranking_rules(
    State(state): State<AppState>,
    body: UpdateBody,
) -> SettingsResult<Json<SettingResponse>> {
    let Json(req) = body?;
    let index_uid = state.index_uid()?;

    submit_update(
        &state,
        index_uid,
        SettingCategory::RankingRules,
        req.ranking_rules()?,
        "ranking rules updated",
    )
    .await
}

/// POST /api/v1/settings/reset
///
/// Reset every setting of the index to the engine defaults.
pub async fn reset_settings(State(state): State<AppState>) -> SettingsResult<Json<SettingResponse>> {
    let index_uid = state.index_uid()?;

    let task = state
        .meili
        .reset_settings(index_uid)
        .await
        .map_err(AppError::upstream("reset failed"))?;

    tracing::info!(index_uid, task_uid = task.task_uid, "Settings reset enqueued");

    Ok(Json(SettingResponse::accepted("settings reset", task.task_uid)))
}

async fn submit_update(
    state: &AppState,
    index_uid: &str,
    category: SettingCategory,
    values: &[String],
    message: &str,
) -> SettingsResult<Json<SettingResponse>> {
    let task = state
        .meili
        .update_setting(index_uid, category, values)
        .await
        .map_err(AppError::upstream("update failed"))?;

    tracing::info!(
        index_uid,
        %category,
        task_uid = task.task_uid,
        status = task.status.as_deref().unwrap_or("unknown"),
        "Settings update enqueued",
    );

    Ok(Json(SettingResponse::accepted(message, task.task_uid)))
}

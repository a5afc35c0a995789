use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    identity::{established_or_new, CurrentUser},
    meals::{
        dto::{DayBucket, MealPayload, MetricsSnapshot},
        repo_types::Meal,
        services::{adherence_metrics, meals_by_day},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/metrics", get(get_metrics))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state, jar, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<MealPayload>,
) -> Result<(StatusCode, CookieJar, Json<Meal>), (StatusCode, String)> {
    let (name, description) = payload.validated_text().map_err(|e| {
        warn!(error = %e, "invalid meal payload");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    // First contact mints the identity cookie; scoping uses it from then on.
    let (user_id, jar) = established_or_new(jar, state.config.identity.cookie_max_age_days);

    let meal = Meal::create(
        &state.db,
        user_id,
        name,
        description,
        payload.consumed_at,
        payload.is_inside_diet,
    )
    .await
    .map_err(internal)?;

    info!(user_id = %user_id, meal_id = %meal.id, "meal created");
    Ok((StatusCode::CREATED, jar, Json(meal)))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<DayBucket>>, (StatusCode, String)> {
    let meals = Meal::list_by_user_desc(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(meals_by_day(meals)))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    match Meal::find(&state.db, user_id, id).await.map_err(internal)? {
        Some(meal) => Ok(Json(meal)),
        None => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MealPayload>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    let (name, description) = payload.validated_text().map_err(|e| {
        warn!(error = %e, "invalid meal payload");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let updated = Meal::update(
        &state.db,
        user_id,
        id,
        name,
        description,
        payload.consumed_at,
        payload.is_inside_diet,
    )
    .await
    .map_err(internal)?;

    match updated {
        Some(meal) => {
            info!(user_id = %user_id, meal_id = %meal.id, "meal updated");
            Ok(Json(meal))
        }
        None => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Meal::delete(&state.db, user_id, id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Meal not found".into()));
    }
    info!(user_id = %user_id, meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_metrics(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<MetricsSnapshot>, (StatusCode, String)> {
    let history = Meal::history_by_user_asc(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(adherence_metrics(&history)))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "database error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

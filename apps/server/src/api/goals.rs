use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{ContributionResponse, GoalUpdateBody},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use finboard_core::goals::{Goal, GoalContribution, NewGoal};

async fn get_goals(State(state): State<Arc<AppState>>) -> Json<Vec<Goal>> {
    Json(state.finance.goals().await)
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let g = state.finance.create_goal(goal).await?;
    Ok((StatusCode::CREATED, Json(g)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(goal): Json<GoalUpdateBody>,
) -> ApiResult<Json<Goal>> {
    let g = state.finance.update_goal(goal.into_update(id)).await?;
    Ok(Json(g))
}

async fn contribute(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(contribution): Json<GoalContribution>,
) -> ApiResult<Json<ContributionResponse>> {
    let (goal, ledger_entry) = state.finance.contribute_to_goal(&id, contribution).await?;
    Ok(Json(ContributionResponse { goal, ledger_entry }))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.finance.delete_goal(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/{id}", put(update_goal).delete(delete_goal))
        .route("/goals/{id}/contributions", post(contribute))
}

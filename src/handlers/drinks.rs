use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::drink::Ingredient;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDrink {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrink {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// GET /drinks - public listing in the short representation
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let drinks = state.drinks().list_all().await?;

    let mut body = Vec::with_capacity(drinks.len());
    for drink in &drinks {
        body.push(drink.short()?);
    }

    Ok(Json(json!({ "success": true, "drinks": body })))
}

/// GET /drinks-detail - long representation, requires get:drink-details
pub async fn list_detail(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    user.require("get:drink-details")?;

    let drinks = state.drinks().list_all().await?;

    let mut body = Vec::with_capacity(drinks.len());
    for drink in &drinks {
        body.push(drink.long()?);
    }

    Ok(Json(json!({ "success": true, "drinks": body })))
}

/// POST /drinks - create a new drink, requires post:drinks
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateDrink>,
) -> Result<Json<Value>, ApiError> {
    user.require("post:drinks")?;

    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("'title' is required"))?;
    let recipe = body
        .recipe
        .ok_or_else(|| ApiError::bad_request("'recipe' is required"))?;

    let drink = state.drinks().create(&title, &recipe).await.map_err(|e| {
        tracing::error!("Failed to store drink: {}", e);
        ApiError::unprocessable_entity("unprocessable")
    })?;

    Ok(Json(json!({ "success": true, "drinks": drink.long()? })))
}

/// PATCH /drinks/:id - partial update, requires patch:drinks
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateDrink>,
) -> Result<Json<Value>, ApiError> {
    user.require("patch:drinks")?;

    if body.title.is_none() && body.recipe.is_none() {
        return Err(ApiError::bad_request(
            "provide 'title' and/or 'recipe' to update",
        ));
    }

    let repo = state.drinks();
    let mut drink = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("resource not found"))?;

    if let Some(title) = body.title {
        // An empty title is rejected rather than silently ignored
        if title.trim().is_empty() {
            return Err(ApiError::bad_request("'title' must not be empty"));
        }
        drink.title = title;
    }
    if let Some(recipe) = body.recipe {
        drink.recipe = Some(
            serde_json::to_string(&recipe)
                .map_err(|_| ApiError::unprocessable_entity("unprocessable"))?,
        );
    }

    repo.update(&drink).await.map_err(|e| {
        tracing::error!("Failed to update drink {}: {}", id, e);
        ApiError::unprocessable_entity("unprocessable")
    })?;

    Ok(Json(json!({ "success": true, "drinks": [drink.long()?] })))
}

/// DELETE /drinks/:id - requires delete:drinks
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    user.require("delete:drinks")?;

    let repo = state.drinks();
    let drink = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("resource not found"))?;

    repo.delete_by_id(drink.id).await?;

    Ok(Json(json!({ "success": true, "deleted": drink.id })))
}

//! Youth organization registry endpoint
//!
//! A single resource path dispatched by method:
//! - `GET` lists every record (or one record with `?id=`)
//! - `POST` creates a record
//! - `PUT` updates the record named by the body's `id`
//! - `DELETE ?id=` removes a record

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    db::YouthOrganizationRepository,
    models::{
        DeleteOrganizationResponse, OrganizationFields, UpdateOrganizationRequest,
        YouthOrganization,
    },
    utils::{AppError, AppResult},
    AppState,
};

/// Query string accepted by `GET` and `DELETE`
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parsed id, `None` when absent or empty
    fn parse(&self) -> AppResult<Option<i64>> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| AppError::bad_request("Invalid organization ID")),
        }
    }
}

pub fn routes() -> MethodRouter<AppState> {
    get(get_organizations)
        .post(create_organization)
        .put(update_organization)
        .delete(delete_organization)
        .options(preflight)
        .fallback(method_not_allowed)
}

async fn get_organizations(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Response> {
    let repo = YouthOrganizationRepository::new(&state.db);

    if let Some(id) = query.parse()? {
        let organization = repo.get_by_id(id).await.map_err(|e| {
            tracing::error!("Failed to get youth organization {}: {:#}", id, e);
            AppError::internal("Failed to get organization")
        })?;

        return match organization {
            Some(org) => Ok(Json(org).into_response()),
            None => Err(AppError::not_found("Organization not found")),
        };
    }

    let organizations = repo.list().await.map_err(|e| {
        tracing::error!("Failed to list youth organizations: {:#}", e);
        AppError::internal("Failed to list organizations")
    })?;

    Ok(Json(organizations).into_response())
}

async fn create_organization(
    State(state): State<AppState>,
    payload: Result<Json<OrganizationFields>, JsonRejection>,
) -> AppResult<(StatusCode, Json<YouthOrganization>)> {
    let Json(fields) = payload.map_err(json_rejection)?;
    fields.validate()?;

    let repo = YouthOrganizationRepository::new(&state.db);
    let organization = repo.create(&fields).await.map_err(|e| {
        tracing::error!("Failed to create youth organization: {:#}", e);
        AppError::internal("Failed to create organization")
    })?;

    tracing::info!(
        id = organization.id,
        number = organization.fields.number,
        "Youth organization created"
    );

    Ok((StatusCode::CREATED, Json(organization)))
}

async fn update_organization(
    State(state): State<AppState>,
    payload: Result<Json<UpdateOrganizationRequest>, JsonRejection>,
) -> AppResult<Json<YouthOrganization>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let id = request
        .id
        .ok_or_else(|| AppError::bad_request("ID is required"))?;
    request.validate()?;

    let repo = YouthOrganizationRepository::new(&state.db);
    let updated = repo.update(id, &request.fields).await.map_err(|e| {
        tracing::error!("Failed to update youth organization {}: {:#}", id, e);
        AppError::internal("Failed to update organization")
    })?;

    match updated {
        Some(organization) => {
            tracing::info!(id, "Youth organization updated");
            Ok(Json(organization))
        }
        None => Err(AppError::not_found("Organization not found")),
    }
}

async fn delete_organization(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<DeleteOrganizationResponse>> {
    let id = query
        .parse()?
        .ok_or_else(|| AppError::bad_request("ID is required"))?;

    let repo = YouthOrganizationRepository::new(&state.db);
    let deleted = repo.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete youth organization {}: {:#}", id, e);
        AppError::internal("Failed to delete organization")
    })?;

    if !deleted {
        return Err(AppError::not_found("Organization not found"));
    }

    tracing::info!(id, "Youth organization deleted");

    Ok(Json(DeleteOrganizationResponse {
        message: "Organization deleted successfully".to_string(),
    }))
}

/// Bare `OPTIONS` requests; CORS headers are added by the router's layer
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::ValidationError(e.body_text()),
        other => AppError::bad_request(other.body_text()),
    }
}

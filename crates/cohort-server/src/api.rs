//! REST endpoints for groups, membership, roles, and join requests.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cohort_core::error::CohortError;
use cohort_core::models::group::{CreateGroup, Group};
use cohort_core::models::permission::{self, Permission};
use cohort_core::models::role::{CreateRole, CustomRole};
use cohort_core::models::user::UserProfile;
use cohort_service::{
    BasicGroupInfo, FullGroupInfo, JoinDecision, JoinRequestView, MemberIdentifier,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Register a directory profile (stand-in for the external signup flow).
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
}

/// Create group request; the requester becomes the owner.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Add member request: a user id or an email address.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub identifier: String,
}

/// Create role request; permissions are wire tags, validated against the
/// closed vocabulary.
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub permissions: Vec<String>,
}

/// Assign role request.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: Uuid,
}

/// Decide join request.
#[derive(Debug, Deserialize)]
pub struct DecideJoinRequest {
    pub decision: String,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Resolved permission list.
#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub permissions: Vec<Permission>,
}

/// Requester identity from the `x-user-id` header.
fn requester_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError(CohortError::validation("missing x-user-id header")))?;
    Uuid::parse_str(raw)
        .map_err(|_| ApiError(CohortError::validation("x-user-id is not a valid user id")))
}

async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let profile = state.directory.register(payload.name, payload.email)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn create_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let owner = requester_id(&headers)?;
    let group = state
        .groups
        .create_group(CreateGroup {
            name: payload.name,
            description: payload.description,
            owner,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(group)))
}

async fn basic_info(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<BasicGroupInfo>, ApiError> {
    Ok(Json(state.groups.basic_info(group_id).await?))
}

async fn full_info(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<FullGroupInfo>, ApiError> {
    Ok(Json(state.groups.full_info(group_id).await?))
}

async fn add_member(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let identifier = MemberIdentifier::parse(&payload.identifier)?;
    let profile = state.membership.add_member(group_id, &identifier).await?;
    Ok(Json(profile))
}

async fn remove_member(
    State(state): State<AppState>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Group>, ApiError> {
    let group = state.membership.remove_member(group_id, user_id).await?;
    Ok(Json(group))
}

async fn create_role(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<CustomRole>), ApiError> {
    let permissions = permission::parse_tags(&payload.permissions)?;
    let role = state
        .roles
        .create_role(
            group_id,
            CreateRole {
                name: payload.name,
                permissions,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(role)))
}

async fn delete_role(
    State(state): State<AppState>,
    Path((group_id, role_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.roles.delete_role(group_id, role_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn assign_role(
    State(state): State<AppState>,
    Path((group_id, role_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AssignRoleRequest>,
) -> Result<Json<CustomRole>, ApiError> {
    let role = state
        .roles
        .assign_role(group_id, payload.user_id, role_id)
        .await?;
    Ok(Json(role))
}

async fn request_join(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Group>, ApiError> {
    let user_id = requester_id(&headers)?;
    let group = state.join.request(group_id, user_id).await?;
    Ok(Json(group))
}

async fn decide_join_request(
    State(state): State<AppState>,
    Path((group_id, user_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<DecideJoinRequest>,
) -> Result<Json<Group>, ApiError> {
    let decision = JoinDecision::parse(&payload.decision)?;
    let group = state.join.decide(group_id, user_id, decision).await?;
    Ok(Json(group))
}

async fn list_join_requests(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<JoinRequestView>>, ApiError> {
    Ok(Json(state.join.list(group_id).await?))
}

async fn resolve_permissions(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<PermissionsResponse>, ApiError> {
    let user_id = requester_id(&headers)?;
    // `effective` applies the owner bypass at this call site; everyone else
    // gets the union of their held roles.
    let permissions = state.permissions.effective(group_id, user_id).await?;
    Ok(Json(PermissionsResponse {
        permissions: permissions.into_iter().collect(),
    }))
}

/// The full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(register_user))
        .route("/groups", post(create_group))
        .route("/groups/{id}", get(basic_info))
        .route("/groups/{id}/full", get(full_info))
        .route("/groups/{id}/members", post(add_member))
        .route("/groups/{id}/members/{user_id}", delete(remove_member))
        .route("/groups/{id}/roles", post(create_role))
        .route("/groups/{id}/roles/{role_id}", delete(delete_role))
        .route("/groups/{id}/roles/{role_id}/assign", post(assign_role))
        .route(
            "/groups/{id}/join-requests",
            post(request_join).get(list_join_requests),
        )
        .route(
            "/groups/{id}/join-requests/{user_id}",
            post(decide_join_request),
        )
        .route("/groups/{id}/permissions", get(resolve_permissions))
        .with_state(state)
}

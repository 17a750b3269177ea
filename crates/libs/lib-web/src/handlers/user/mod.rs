//! # User Handlers
//!
//! Endpoints behind the auth gate. Each one reads and writes only the record
//! named by the request's [`Ctx`], except the two directory views (`/all` and
//! `/skills/stats`), which read every record but never expose a hash.

use crate::services::skills;
use axum::extract::{Extension, Json, Path, State};
use lib_core::dto::{
    AddSkillRequest, ProfileUpdatedResponse, SkillStatsResponse, SkillsResponse,
    UpdateProfileRequest, UserProfile, UsersResponse,
};
use lib_core::model::store::{User, UserForUpdate, UserRepository};
use lib_core::{AppError, Ctx, DbPool, Result};
use lib_utils::validate_not_empty;
use tracing::{debug, info};

/// The caller's own record; a valid token for a deleted user is a 404.
async fn current_user(pool: &DbPool, ctx: &Ctx) -> Result<User> {
    UserRepository::find_by_id(pool, ctx.subject())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Persist a new skill list for the caller.
async fn store_skills(pool: &DbPool, ctx: &Ctx, skills: &[String]) -> Result<()> {
    UserRepository::set_skills(pool, ctx.subject(), skills)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(())
}

/// `GET /api/user/profile`
pub async fn get_profile(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
) -> Result<Json<UserProfile>> {
    let user = current_user(&pool, &ctx).await?;
    Ok(Json(user.into()))
}

/// `PUT /api/user/profile` - only the fields present in the body change.
pub async fn update_profile(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdatedResponse>> {
    if let Some(name) = &req.name {
        validate_not_empty(name, "Name").map_err(AppError::Validation)?;
    }

    let update = UserForUpdate {
        name: req.name,
        skills: req.skills,
    };

    let user = UserRepository::update(&pool, ctx.subject(), update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!(user_id = %ctx.subject(), "[PROFILE] Updated");

    Ok(Json(ProfileUpdatedResponse {
        msg: "Profile updated".to_string(),
        user: user.into(),
    }))
}

/// `POST /api/user/skills` - adding a skill already listed is a no-op.
pub async fn add_skill(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
    Json(req): Json<AddSkillRequest>,
) -> Result<Json<SkillsResponse>> {
    let skill = req
        .skill
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Skill is required".to_string()))?;

    let mut skills = current_user(&pool, &ctx).await?.skills.0;

    if skills::add_skill(&mut skills, &skill) {
        store_skills(&pool, &ctx, &skills).await?;
    } else {
        debug!("[SKILLS] Already listed: {}", skill);
    }

    Ok(Json(SkillsResponse {
        msg: Some("Skill added".to_string()),
        skills,
    }))
}

/// Drop every copy of `skill_name` from the caller's list.
async fn remove_named_skill(pool: &DbPool, ctx: &Ctx, skill_name: &str) -> Result<SkillsResponse> {
    let mut skills = current_user(pool, ctx).await?.skills.0;

    if skills::remove_skill(&mut skills, skill_name) {
        store_skills(pool, ctx, &skills).await?;
    }

    Ok(SkillsResponse {
        msg: Some("Skill removed".to_string()),
        skills,
    })
}

/// `DELETE /api/user/skills/{skill_name}`
pub async fn remove_skill(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
    Path(skill_name): Path<String>,
) -> Result<Json<SkillsResponse>> {
    Ok(Json(remove_named_skill(&pool, &ctx, &skill_name).await?))
}

/// `DELETE /api/user/skills/stats` - the static stats route shadows the
/// `{skill_name}` capture, so a skill literally named "stats" lands here.
pub async fn remove_stats_skill(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
) -> Result<Json<SkillsResponse>> {
    Ok(Json(remove_named_skill(&pool, &ctx, "stats").await?))
}

/// `GET /api/user/skills`
pub async fn list_skills(
    State(pool): State<DbPool>,
    Extension(ctx): Extension<Ctx>,
) -> Result<Json<SkillsResponse>> {
    let skills = current_user(&pool, &ctx).await?.skills.0;

    Ok(Json(SkillsResponse { msg: None, skills }))
}

/// `GET /api/user/all`
pub async fn list_users(State(pool): State<DbPool>) -> Result<Json<UsersResponse>> {
    let users = UserRepository::list_all(&pool)
        .await?
        .into_iter()
        .map(UserProfile::from)
        .collect();

    Ok(Json(UsersResponse { users }))
}

/// `GET /api/user/skills/stats`
pub async fn skill_stats(State(pool): State<DbPool>) -> Result<Json<SkillStatsResponse>> {
    let users = UserRepository::list_all(&pool).await?;

    Ok(Json(SkillStatsResponse {
        skill_stats: skills::skill_stats(&users),
    }))
}

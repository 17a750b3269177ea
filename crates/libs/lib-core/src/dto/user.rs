//! # User Data Transfer Objects
//!
//! Bodies of the identity-scoped `/api/user/*` endpoints. None of these
//! types has a password-hash field, so a stored hash cannot leak through them.

use crate::model::store::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user record minus its password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            skills: user.skills.0,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `PUT /api/user/profile` body; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdatedResponse {
    pub msg: String,
    pub user: UserProfile,
}

/// `POST /api/user/skills` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddSkillRequest {
    #[serde(default)]
    pub skill: Option<String>,
}

/// Skill list, with a message on mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillsResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub msg: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserProfile>,
}

/// How many users list a skill, and who they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillStat {
    pub count: usize,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkillStatsResponse {
    pub skill_stats: BTreeMap<String, SkillStat>,
}

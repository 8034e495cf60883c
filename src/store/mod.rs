//! Key-addressed persistence for accounts and nutrition profiles.
//!
//! One [`Store`] trait, two backends: an in-process map for tests and local
//! runs, and Postgres for real deployments. The backend is picked by
//! configuration; everything above this module only sees the trait object.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// User identity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => anyhow::bail!("unknown gender: {s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very-active",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very-active" => Ok(ActivityLevel::VeryActive),
            _ => anyhow::bail!("unknown activity level: {s}"),
        }
    }
}

/// Biometric and preference record driving meal-plan generation.
/// At most one per account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub dietary_preferences: Vec<String>,
    pub health_goals: Vec<String>,
    pub activity_level: ActivityLevel,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub user_id: Uuid,
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub dietary_preferences: Vec<String>,
    pub health_goals: Vec<String>,
    pub activity_level: ActivityLevel,
}

/// Partial update applied to a stored profile; `None` fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileChanges {
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub dietary_preferences: Option<Vec<String>>,
    pub health_goals: Option<Vec<String>>,
    pub activity_level: Option<ActivityLevel>,
}

/// Abstract account/profile store.
///
/// Domain conditions (missing record, absent profile) come back as `None`;
/// `Err` is reserved for infrastructure failures and propagates unmodified.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_account(&self, new: NewAccount) -> anyhow::Result<Account>;
    async fn find_account_by_email(&self, email: &str) -> anyhow::Result<Option<Account>>;
    async fn find_account_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>>;

    async fn create_profile(&self, new: NewProfile) -> anyhow::Result<Profile>;
    async fn find_profile_by_account(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    async fn find_profile_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;
    /// Merges `changes` into the stored profile and refreshes `updated_at`.
    /// Returns `None` when the id is unknown; never creates a record.
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Profile>>;
}

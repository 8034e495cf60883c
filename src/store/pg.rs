//! Postgres store backend.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    Account, ActivityLevel, Gender, NewAccount, NewProfile, Profile, ProfileChanges, Store,
};

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    /// Connects, runs pending migrations, and returns the store.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;
        Ok(Self { db })
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password_hash,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// Gender/activity live in TEXT columns; the row type keeps them as strings
// and converts on the way out.
#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    age: i32,
    gender: String,
    height_cm: f64,
    weight_kg: f64,
    dietary_preferences: Vec<String>,
    health_goals: Vec<String>,
    activity_level: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            age: r.age,
            gender: Gender::from_str(&r.gender)?,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            dietary_preferences: r.dietary_preferences,
            health_goals: r.health_goals,
            activity_level: ActivityLevel::from_str(&r.activity_level)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";
const PROFILE_COLUMNS: &str = "id, user_id, age, gender, height_cm, weight_kg, \
     dietary_preferences, health_goals, activity_level, created_at, updated_at";

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, new: NewAccount) -> anyhow::Result<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn find_account_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn find_account_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM users
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn create_profile(&self, new: NewProfile) -> anyhow::Result<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO profiles
                (user_id, age, gender, height_cm, weight_kg,
                 dietary_preferences, health_goals, activity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.age)
        .bind(new.gender.as_str())
        .bind(new.height_cm)
        .bind(new.weight_kg)
        .bind(&new.dietary_preferences)
        .bind(&new.health_goals)
        .bind(new.activity_level.as_str())
        .fetch_one(&self.db)
        .await?;
        row.try_into()
    }

    async fn find_profile_by_account(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            WHERE user_id = $1
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn find_profile_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(TryInto::try_into).transpose()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profiles SET
                age = COALESCE($2, age),
                gender = COALESCE($3, gender),
                height_cm = COALESCE($4, height_cm),
                weight_kg = COALESCE($5, weight_kg),
                dietary_preferences = COALESCE($6, dietary_preferences),
                health_goals = COALESCE($7, health_goals),
                activity_level = COALESCE($8, activity_level),
                updated_at = now()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.age)
        .bind(changes.gender.map(|g| g.as_str()))
        .bind(changes.height_cm)
        .bind(changes.weight_kg)
        .bind(changes.dietary_preferences)
        .bind(changes.health_goals)
        .bind(changes.activity_level.map(|a| a.as_str()))
        .fetch_optional(&self.db)
        .await?;
        row.map(TryInto::try_into).transpose()
    }
}

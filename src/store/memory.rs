//! Process-local store backend. Backs unit tests and `STORE_BACKEND=memory`
//! runs; state lives behind an async lock owned by [`MemoryStore`], not in
//! module-level globals.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Account, NewAccount, NewProfile, Profile, ProfileChanges, Store};

#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, new: NewAccount) -> anyhow::Result<Account> {
        let now = OffsetDateTime::now_utc();
        let account = Account {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        self.accounts
            .write()
            .await
            .insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_account_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn create_profile(&self, new: NewProfile) -> anyhow::Result<Profile> {
        let now = OffsetDateTime::now_utc();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            age: new.age,
            gender: new.gender,
            height_cm: new.height_cm,
            weight_kg: new.weight_kg,
            dietary_preferences: new.dietary_preferences,
            health_goals: new.health_goals,
            activity_level: new.activity_level,
            created_at: now,
            updated_at: now,
        };
        self.profiles
            .write()
            .await
            .insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn find_profile_by_account(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_profile_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        Ok(self.profiles.read().await.get(&id).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> anyhow::Result<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        let Some(profile) = profiles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(age) = changes.age {
            profile.age = age;
        }
        if let Some(gender) = changes.gender {
            profile.gender = gender;
        }
        if let Some(height_cm) = changes.height_cm {
            profile.height_cm = height_cm;
        }
        if let Some(weight_kg) = changes.weight_kg {
            profile.weight_kg = weight_kg;
        }
        if let Some(prefs) = changes.dietary_preferences {
            profile.dietary_preferences = prefs;
        }
        if let Some(goals) = changes.health_goals {
            profile.health_goals = goals;
        }
        if let Some(level) = changes.activity_level {
            profile.activity_level = level;
        }
        profile.updated_at = OffsetDateTime::now_utc();
        Ok(Some(profile.clone()))
    }
}

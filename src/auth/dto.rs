use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after signup or login. Every login mints a fresh
/// token; earlier tokens stay valid until they expire.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicAccount,
}

/// Public part of the account returned to the client; never carries the
/// credential.
#[derive(Debug, Serialize)]
pub struct PublicAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<crate::store::Account> for PublicAccount {
    fn from(a: crate::store::Account) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
        }
    }
}

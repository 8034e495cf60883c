use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicAccount, SignupRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
    },
    error::{AppError, Result},
    state::AppState,
    store::NewAccount,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }

    // Ensure email is not taken
    if state
        .store
        .find_account_by_email(&payload.email)
        .await?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password(&payload.password)?;
    let account = state
        .store
        .create_account(NewAccount {
            name: payload.name.trim().to_string(),
            email: payload.email,
            password_hash: hash,
        })
        .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(account.id)?;

    info!(user_id = %account.id, email = %account.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: account.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    payload.email = payload.email.trim().to_lowercase();

    let account = match state.store.find_account_by_email(&payload.email).await? {
        Some(a) => a,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &account.password_hash)? {
        warn!(email = %payload.email, user_id = %account.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(account.id)?;

    info!(user_id = %account.id, email = %account.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicAccount>> {
    let account = state
        .store
        .find_account_by_id(user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(account.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store};

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spaces in@mail.com"));
    }

    #[test]
    fn public_account_serialization_omits_credential() {
        let account = crate::store::Account {
            id: uuid::Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            password_hash: "secret-hash".into(),
            created_at: time::OffsetDateTime::now_utc(),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        let public: PublicAccount = account.into();
        let json = serde_json::to_string(&public).unwrap();
        assert!(json.contains("asha@example.com"));
        assert!(!json.contains("secret-hash"));
    }

    #[tokio::test]
    async fn signup_rejects_already_registered_email() {
        let state = AppState::fake();
        let first = signup(
            State(state.clone()),
            Json(SignupRequest {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                password: "hunter2hunter2".into(),
            }),
        )
        .await;
        assert!(first.is_ok());

        // same address, different casing and padding; other fields differ too
        let second = signup(
            State(state),
            Json(SignupRequest {
                name: "Another Asha".into(),
                email: "  Asha@Example.COM ".into(),
                password: "a-different-password".into(),
            }),
        )
        .await;
        assert!(matches!(second, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn signup_then_login_handlers_round_trip() {
        let state = AppState::fake();
        let (_, Json(signed_up)) = signup(
            State(state.clone()),
            Json(SignupRequest {
                name: "Ravi".into(),
                email: "ravi@example.com".into(),
                password: "hunter2hunter2".into(),
            }),
        )
        .await
        .expect("signup");

        let Json(logged_in) = login(
            State(state),
            Json(LoginRequest {
                email: "ravi@example.com".into(),
                password: "hunter2hunter2".into(),
            }),
        )
        .await
        .expect("login");

        assert_eq!(logged_in.user.id, signed_up.user.id);
        assert_eq!(logged_in.user.name, "Ravi");
        assert_eq!(logged_in.user.email, "ravi@example.com");
    }

    #[tokio::test]
    async fn login_rejects_wrong_credential() {
        let state = AppState::fake();
        signup(
            State(state.clone()),
            Json(SignupRequest {
                name: "Mira".into(),
                email: "mira@example.com".into(),
                password: "correct-password".into(),
            }),
        )
        .await
        .expect("signup");

        let denied = login(
            State(state),
            Json(LoginRequest {
                email: "mira@example.com".into(),
                password: "wrong-password".into(),
            }),
        )
        .await;
        assert!(matches!(denied, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn signup_then_login_matches_identity_fields() {
        let store = MemoryStore::new();
        let hash = hash_password("hunter2hunter2").unwrap();
        let created = store
            .create_account(NewAccount {
                name: "Ravi".into(),
                email: "ravi@example.com".into(),
                password_hash: hash,
            })
            .await
            .unwrap();

        // the login path: lookup by email, verify credential
        let found = store
            .find_account_by_email("ravi@example.com")
            .await
            .unwrap()
            .expect("account present");
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Ravi");
        assert!(verify_password("hunter2hunter2", &found.password_hash).unwrap());
        assert!(!verify_password("wrong-password", &found.password_hash).unwrap());
    }
}

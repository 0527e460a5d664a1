use anyhow::anyhow;
use chrono::Utc;

use crate::error::{ClubError, ClubResult, Precondition};
use crate::middlewares::auth::{JwtClaims, JwtService};
use crate::models::user::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User, UserRole,
};
use crate::store::{ClubStore, SharedStore};

pub struct AuthService {
    store: SharedStore,
    jwt_service: JwtService,
    access_token_ttl_seconds: i64,
    demo_password: String,
}

impl AuthService {
    pub fn new(
        store: SharedStore,
        jwt_service: JwtService,
        access_token_ttl_seconds: i64,
        demo_password: String,
    ) -> Self {
        Self {
            store,
            jwt_service,
            access_token_ttl_seconds,
            demo_password,
        }
    }

    /// Register a new member with score 0 joined today.
    pub async fn register(&self, req: RegisterRequest) -> ClubResult<AuthResponse> {
        let mut store = self.store.write().await;

        if store.user_by_email(&req.email).is_some() {
            tracing::warn!(email = %req.email, "Registration refused: email taken");
            return Err(ClubError::PreconditionFailed(Precondition::EmailTaken));
        }

        let user = User {
            id: ClubStore::new_id(),
            username: req.username,
            email: req.email,
            score: 0,
            join_date: Utc::now().date_naive(),
            role: UserRole::User,
            student_id: None,
            avatar: None,
        };
        let access_token = self.generate_access_token(&user)?;
        store.insert_user(user.clone());

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");
        Ok(AuthResponse { access_token, user })
    }

    /// Any known email with the shared demo password signs in.
    pub async fn login(&self, req: LoginRequest) -> ClubResult<AuthResponse> {
        let store = self.store.read().await;

        let user = match store.user_by_email(&req.email) {
            Some(user) if req.password == self.demo_password => user.clone(),
            _ => {
                tracing::warn!(email = %req.email, "Failed login attempt");
                return Err(ClubError::PreconditionFailed(
                    Precondition::InvalidCredentials,
                ));
            }
        };

        tracing::info!(user_id = %user.id, email = %req.email, "Successful login");

        let access_token = self.generate_access_token(&user)?;
        Ok(AuthResponse { access_token, user })
    }

    /// Revoke the token identified by `jti`; later requests carrying it are refused.
    pub async fn logout(&self, claims: &JwtClaims) {
        self.store.write().await.revoke_token(
            &claims.jti,
            claims.exp as i64,
            Utc::now().timestamp(),
        );
        tracing::info!(user_id = %claims.sub, "User logged out");
    }

    pub async fn me(&self, user_id: &str) -> ClubResult<User> {
        let store = self.store.read().await;
        store.require_user(user_id).cloned()
    }

    /// Update a profile. Only the user themself or an admin may do this.
    pub async fn update_profile(
        &self,
        caller_id: &str,
        user_id: &str,
        req: UpdateProfileRequest,
    ) -> ClubResult<User> {
        let mut store = self.store.write().await;

        let caller = store.require_user(caller_id)?;
        if caller.id != user_id && !caller.is_admin() {
            return Err(ClubError::AdminRequired);
        }

        if let Some(email) = req.email.as_deref() {
            if store
                .user_by_email(email)
                .is_some_and(|other| other.id != user_id)
            {
                return Err(ClubError::PreconditionFailed(Precondition::EmailTaken));
            }
        }

        let user = store
            .user_mut(user_id)
            .ok_or(ClubError::NotFound("User"))?;
        if let Some(username) = req.username {
            user.username = username;
        }
        if let Some(email) = req.email {
            user.email = email;
        }
        if let Some(student_id) = req.student_id {
            user.student_id = Some(student_id);
        }
        if let Some(avatar) = req.avatar {
            user.avatar = Some(avatar);
        }

        tracing::info!(user_id = %user_id, updated_by = %caller_id, "Profile updated");
        Ok(user.clone())
    }

    /// Cumulative score, 0 for an unknown user.
    pub async fn get_user_score(&self, user_id: &str) -> u64 {
        self.store
            .read()
            .await
            .user(user_id)
            .map(|u| u.score)
            .unwrap_or(0)
    }

    fn generate_access_token(&self, user: &User) -> ClubResult<String> {
        let claims = JwtClaims::for_user(user, self.access_token_ttl_seconds);
        self.jwt_service
            .generate_token(&claims)
            .map_err(|e| ClubError::Internal(anyhow!("Failed to generate token: {}", e)))
    }
}

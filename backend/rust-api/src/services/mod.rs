use crate::config::Config;
use crate::middlewares::auth::JwtService;
use crate::store::{ClubStore, SharedStore};

pub struct AppState {
    pub config: Config,
    pub store: SharedStore,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(config: Config, store: ClubStore) -> Self {
        let jwt = JwtService::new(&config.jwt_secret);
        tracing::info!(
            users = store.users().len(),
            contests = store.contests().len(),
            "Club store ready"
        );

        Self {
            config,
            store: store.into_shared(),
            jwt,
        }
    }

    /// Store according to `seed_demo_data`.
    pub fn initial_store(config: &Config) -> ClubStore {
        if config.seed_demo_data {
            ClubStore::seeded()
        } else {
            ClubStore::new()
        }
    }
}

pub mod attempt_timer;
pub mod auth_service;
pub mod contest_service;
pub mod event_service;
pub mod forum_service;
pub mod leaderboard_service;

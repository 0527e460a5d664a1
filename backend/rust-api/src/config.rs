use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub access_token_ttl_seconds: i64,
    /// The one password every login accepts.
    pub demo_password: String,
    pub seed_demo_data: bool,
    pub timer: TimerConfig,
    pub metrics_auth: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// How often the background worker looks for attempts that ran out of time.
    pub sweep_interval_ms: u64,
    /// Countdown tick period of the SSE stream.
    pub tick_interval_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: 1000,
            tick_interval_ms: 1000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load environment variables from root .env file (two levels up)
        // Try root .env first, then fallback to local .env
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let jwt_secret = match settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
        {
            Ok(secret) => secret,
            Err(_) if env == "prod" => {
                return Err(config::ConfigError::Message(
                    "JWT_SECRET must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            }
        };

        let access_token_ttl_seconds = settings
            .get_int("auth.access_token_ttl_seconds")
            .ok()
            .or_else(|| {
                env::var("JWT_ACCESS_TOKEN_TTL_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
            })
            .filter(|v| *v > 0)
            .unwrap_or(86400);

        let demo_password = settings
            .get_string("auth.demo_password")
            .unwrap_or_else(|_| "password".to_string());

        let seed_demo_data = settings.get_bool("store.seed_demo_data").unwrap_or(true);

        let defaults = TimerConfig::default();
        let timer = TimerConfig {
            sweep_interval_ms: positive_ms(&settings, "timer.sweep_interval_ms")
                .unwrap_or(defaults.sweep_interval_ms),
            tick_interval_ms: positive_ms(&settings, "timer.tick_interval_ms")
                .unwrap_or(defaults.tick_interval_ms),
        };

        let metrics_auth =
            env::var("METRICS_AUTH").unwrap_or_else(|_| "admin:changeme".to_string());

        Ok(Config {
            bind_addr,
            jwt_secret,
            access_token_ttl_seconds,
            demo_password,
            seed_demo_data,
            timer,
            metrics_auth,
        })
    }

    /// Deterministic configuration that ignores the process environment.
    pub fn for_tests() -> Self {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: "test-secret".to_string(),
            access_token_ttl_seconds: 3600,
            demo_password: "password".to_string(),
            seed_demo_data: true,
            timer: TimerConfig::default(),
            metrics_auth: "admin:changeme".to_string(),
        }
    }
}

fn positive_ms(settings: &config::Config, key: &str) -> Option<u64> {
    settings
        .get_int(key)
        .ok()
        .filter(|v| *v > 0)
        .map(|v| v as u64)
}

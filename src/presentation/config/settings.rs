use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub conversion: ConversionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreSettings {
    /// Volatile store; suitable for demos and tests.
    Memory,
    /// Single-file JSON snapshot, the reference's flat persistence.
    Json { data_path: PathBuf },
    /// Production backend.
    Postgres { url: String, max_connections: u32 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionSettings {
    /// Assigned to converted Jobs whose document names no employee.
    pub default_employee: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Process configuration from environment variables, with defaults that
    /// boot a self-contained JSON-backed instance.
    pub fn from_env() -> Self {
        let store = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreSettings::Memory,
            Ok("postgres") => StoreSettings::Postgres {
                url: std::env::var("DATABASE_URL").unwrap_or_default(),
                max_connections: std::env::var("PG_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            },
            _ => StoreSettings::Json {
                data_path: std::env::var("STORE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data/fieldline.json")),
            },
        };

        Self {
            server: ServerSettings {
                host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            store,
            conversion: ConversionSettings {
                default_employee: std::env::var("DEFAULT_EMPLOYEE")
                    .unwrap_or_else(|_| "Unassigned".to_string()),
            },
            logging: LoggingSettings {
                level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                enable_json: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }
}

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORAGE_DIR: &str = "generated_plans";
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 2000;
pub const DEFAULT_MOCK_IMAGE_URL: &str =
    "https://via.placeholder.com/800x600/4A90E2/FFFFFF?text=AI+Generated+Floor+Plan";

#[derive(Debug, Clone)]
pub struct FloorplanConfig {
    pub common: core_config::Config,
    pub storage: StorageConfig,
    pub generator: GeneratorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory that receives one provenance record per accepted request.
    pub provenance_dir: PathBuf,
    /// Built frontend bundle served at `/`.
    pub static_dir: PathBuf,
}

/// Which floor plan generator backs the invoker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorConfig {
    Mock { latency: Duration, image_url: String },
    Remote { endpoint: String },
}

impl GeneratorConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorConfig::Mock { .. } => "mock",
            GeneratorConfig::Remote { .. } => "remote",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub otlp_endpoint: Option<String>,
}

impl FloorplanConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service settings from an arbitrary key lookup.
    ///
    /// Outside `ENVIRONMENT=prod` every setting has a development default;
    /// in production each one must be provided.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        let generator = match get("FLOORPLAN_GENERATOR", Some("mock"))?.as_str() {
            "mock" => {
                let latency_ms = get(
                    "FLOORPLAN_MOCK_LATENCY_MS",
                    Some(&DEFAULT_MOCK_LATENCY_MS.to_string()),
                )?;
                let latency_ms: u64 = latency_ms.parse().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "FLOORPLAN_MOCK_LATENCY_MS must be a whole number of milliseconds, got '{}': {}",
                        latency_ms,
                        e
                    ))
                })?;
                GeneratorConfig::Mock {
                    latency: Duration::from_millis(latency_ms),
                    image_url: get("FLOORPLAN_MOCK_IMAGE_URL", Some(DEFAULT_MOCK_IMAGE_URL))?,
                }
            }
            "remote" => GeneratorConfig::Remote {
                endpoint: get("FLOORPLAN_GENERATOR_URL", None)?,
            },
            other => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "FLOORPLAN_GENERATOR must be 'mock' or 'remote', got '{}'",
                    other
                )))
            }
        };

        Ok(FloorplanConfig {
            common,
            storage: StorageConfig {
                provenance_dir: get("FLOORPLAN_STORAGE_DIR", Some(DEFAULT_STORAGE_DIR))?.into(),
                static_dir: get("FLOORPLAN_STATIC_DIR", Some(DEFAULT_STATIC_DIR))?.into(),
            },
            generator,
            logging: LoggingConfig {
                level: get("LOG_LEVEL", Some("info"))?,
                otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|s| !s.is_empty()),
            },
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

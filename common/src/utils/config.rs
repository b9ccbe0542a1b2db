use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Local,
    Memory,
    S3,
}

fn default_storage_kind() -> StorageKind {
    StorageKind::Local
}

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    pub surrealdb_address: String,
    #[serde(default = "default_surrealdb_user")]
    pub surrealdb_username: String,
    #[serde(default = "default_surrealdb_user")]
    pub surrealdb_password: String,
    #[serde(default = "default_surrealdb_namespace")]
    pub surrealdb_namespace: String,
    #[serde(default = "default_surrealdb_database")]
    pub surrealdb_database: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_storage_kind")]
    pub storage: StorageKind,
    #[serde(default)]
    pub asset_bucket: Option<String>,
    #[serde(default)]
    pub asset_access_key: Option<String>,
    #[serde(default)]
    pub asset_access_secret: Option<String>,
    #[serde(default)]
    pub asset_region: Option<String>,
    #[serde(default)]
    pub asset_endpoint: Option<String>,
    #[serde(default = "default_asset_namespace")]
    pub asset_namespace: String,
    #[serde(default = "default_asset_public_url")]
    pub asset_public_url: String,
}

fn default_surrealdb_user() -> String {
    "root".to_string()
}

fn default_surrealdb_namespace() -> String {
    "kirana".to_string()
}

fn default_surrealdb_database() -> String {
    "catalog".to_string()
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_asset_namespace() -> String {
    "kirana".to_string()
}

fn default_asset_public_url() -> String {
    "http://localhost:8080/assets".to_string()
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_everything_but_the_address() {
        let config = Config::builder()
            .set_override("surrealdb_address", "mem://")
            .expect("override")
            .build()
            .expect("build");

        let app_config: AppConfig = config.try_deserialize().expect("deserialize");
        assert_eq!(app_config.surrealdb_address, "mem://");
        assert_eq!(app_config.surrealdb_username, "root");
        assert_eq!(app_config.surrealdb_namespace, "kirana");
        assert_eq!(app_config.storage, StorageKind::Local);
        assert_eq!(app_config.asset_namespace, "kirana");
        assert!(app_config.asset_bucket.is_none());
    }

    #[test]
    fn missing_address_is_an_error() {
        let config = Config::builder().build().expect("build");
        let result: Result<AppConfig, _> = config.try_deserialize();
        assert!(result.is_err());
    }

    #[test]
    fn storage_kind_parses_lowercase() {
        let config = Config::builder()
            .set_override("surrealdb_address", "mem://")
            .expect("override")
            .set_override("storage", "s3")
            .expect("override")
            .build()
            .expect("build");

        let app_config: AppConfig = config.try_deserialize().expect("deserialize");
        assert_eq!(app_config.storage, StorageKind::S3);
    }
}

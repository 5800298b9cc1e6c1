use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

/// config properties for the remote blob store the file bytes live in
#[derive(Deserialize, Clone)]
pub struct RemoteStoreConfig {
    /// base url of the store's http api
    #[serde(rename = "baseurl")]
    pub base_url: String,
    /// namespace prepended to every remote key we hand to the store
    #[serde(rename = "keyprefix")]
    pub key_prefix: String,
}

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct CloudboxConfig {
    pub remote: RemoteStoreConfig,
    pub database: DbConfig,
}

/// Parses the config file located at ./Cloudbox.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> CloudboxConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./Cloudbox.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return CLOUDBOX_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(CLOUDBOX_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static CLOUDBOX_CONFIG: Lazy<CloudboxConfig> = Lazy::new(parse_config);
static CLOUDBOX_CONFIG_DEFAULT: Lazy<CloudboxConfig> = Lazy::new(|| CloudboxConfig {
    remote: RemoteStoreConfig {
        base_url: "http://127.0.0.1:9199".to_string(),
        key_prefix: "cloudbox".to_string(),
    },
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
});

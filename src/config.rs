use crate::error::{config_error, env_error, MaestroResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Storage key holding the serialized meeting collection
pub const DEFAULT_STORAGE_KEY: &str = "meetings";

/// Default location of the optional TOML configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config/maestro.toml";

/// Default Gemini model used for time suggestions
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Which persistence backend holds the meeting collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    File,
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("Unknown store backend: {}", other)),
        }
    }
}

/// The catalogue of bookable time slots offered per date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSettings {
    /// Hour of the first slot of the day
    pub first_hour: u32,
    /// Number of slots per day
    pub count: u32,
    /// Minutes between two consecutive slots
    pub step_minutes: u32,
    /// Accept any HH:MM time instead of only catalogue slots
    pub allow_free_form: bool,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            first_hour: 9,
            count: 9,
            step_minutes: 60,
            allow_free_form: false,
        }
    }
}

impl SlotSettings {
    /// Minutes after midnight at which the last slot starts.
    ///
    /// None for an empty catalogue or when the arithmetic overflows.
    pub fn last_slot_minutes(&self) -> Option<u32> {
        let span = self.count.checked_sub(1)?.checked_mul(self.step_minutes)?;
        self.first_hour.checked_mul(60)?.checked_add(span)
    }
}

/// Values that may be provided through the TOML configuration file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    slots: Option<SlotSettings>,
    participants: Option<Vec<String>>,
}

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persistence backend for meetings
    pub store_backend: StoreBackend,
    /// JSON file used by the file backend
    pub store_path: PathBuf,
    /// Redis connection URL used by the redis backend
    pub redis_url: String,
    /// Key under which the meeting collection is stored
    pub storage_key: String,
    /// Address the web interface binds to
    pub bind_address: String,
    /// Port the web interface listens on
    pub port: u16,
    /// Timezone used to decide what "today" is
    pub timezone: String,
    /// Locale for user-facing notices
    pub locale: String,
    /// Gemini API key, suggestions are disabled without it
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Slot catalogue settings
    pub slots: SlotSettings,
    /// Participant addresses offered by the meeting form
    pub participant_directory: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::File,
            store_path: PathBuf::from("data/meetings.json"),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            timezone: "UTC".to_string(),
            locale: "en".to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            slots: SlotSettings::default(),
            participant_directory: vec![
                "student1@example.com".to_string(),
                "student2@example.com".to_string(),
                "student3@example.com".to_string(),
            ],
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> MaestroResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        if let Ok(backend) = env::var("MAESTRO_STORE") {
            config.store_backend = backend.parse().map_err(|_| env_error("MAESTRO_STORE"))?;
        }
        if let Ok(path) = env::var("MAESTRO_STORE_PATH") {
            config.store_path = PathBuf::from(path);
        }
        if let Ok(url) = env::var("REDIS_URL") {
            config.redis_url = url;
        }
        if let Ok(key) = env::var("MAESTRO_STORAGE_KEY") {
            config.storage_key = key;
        }
        if let Ok(address) = env::var("BIND_ADDRESS") {
            config.bind_address = address;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port.parse::<u16>().map_err(|_| env_error("PORT"))?;
        }
        if let Ok(timezone) = env::var("TIMEZONE") {
            config.timezone = timezone;
        }
        if let Ok(locale) = env::var("MAESTRO_LOCALE") {
            config.locale = locale;
        }
        config.gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty());
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini_model = model;
        }

        // Merge the optional config file
        let config_file =
            env::var("MAESTRO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        if let Ok(content) = fs::read_to_string(&config_file) {
            config.merge_toml(&content)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge settings from a TOML document into this config
    pub fn merge_toml(&mut self, content: &str) -> MaestroResult<()> {
        let file: FileConfig = toml::from_str(content)?;
        if let Some(slots) = file.slots {
            self.slots = slots;
        }
        if let Some(participants) = file.participants {
            self.participant_directory = participants;
        }
        Ok(())
    }

    /// Check that the settings describe a usable configuration
    pub fn validate(&self) -> MaestroResult<()> {
        self.tz()?;

        if self.storage_key.trim().is_empty() {
            return Err(config_error("Storage key must not be empty"));
        }
        if self.slots.count == 0 {
            return Err(config_error("Slot count must be at least 1"));
        }
        if self.slots.step_minutes == 0 {
            return Err(config_error("Slot step must be at least one minute"));
        }
        match self.slots.last_slot_minutes() {
            Some(minutes) if minutes < 24 * 60 => {}
            _ => return Err(config_error("Slot catalogue must end before midnight")),
        }

        Ok(())
    }

    /// Parsed timezone
    pub fn tz(&self) -> MaestroResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

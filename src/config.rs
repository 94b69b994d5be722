use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub lobby: LobbyConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub server_ip: String,
    pub port: u16,
    #[serde(default)]
    pub secure: bool,
}

/// Local bounds applied before a phase time is sent to the server.
#[derive(Debug, Clone, Deserialize)]
pub struct LobbyConfig {
    #[serde(default)]
    pub min_phase_secs: u64,
    #[serde(default = "default_max_phase_secs")]
    pub max_phase_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    pub lang_path: Option<String>,
}

fn default_max_phase_secs() -> u64 {
    1000
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            min_phase_secs: 0,
            max_phase_secs: default_max_phase_secs(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            lang_path: None,
        }
    }
}

impl LobbyConfig {
    pub fn accepts_phase_time(&self, secs: u64) -> bool {
        (self.min_phase_secs..=self.max_phase_secs).contains(&secs)
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn server_url(&self) -> String {
        let scheme = if self.server.secure { "wss" } else { "ws" };
        format!("{scheme}://{}:{}", self.server.server_ip, self.server.port)
    }
}

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "LOOKUP";

/// Layers the optional TOML file at `config_path` under `LOOKUP__*`
/// environment variables, e.g. `LOOKUP__RESOLVER__ROOT_SERVER=192.5.5.241`.
pub fn get_config<'de, T: Deserialize<'de>>(
    config_path: PathBuf,
) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true);
    let config = config::Config::builder()
        .add_source(f)
        .add_source(env)
        .build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupConfiguration {
    #[serde(default)]
    pub resolver: ResolverConfiguration,
    #[serde(default)]
    pub transport: TransportConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfiguration {
    /// Where iterative resolution starts, a.root-servers.net by default.
    pub root_server: Ipv4Addr,
    /// Recursive resolver to hand queries to instead of walking from the root.
    pub upstream: Option<Ipv4Addr>,
    /// How deep glueless referrals may nest.
    pub max_referral_depth: usize,
    /// Queries one resolution may issue, nested glueless lookups included.
    pub max_queries: usize,
}

impl Default for ResolverConfiguration {
    fn default() -> Self {
        Self {
            root_server: Ipv4Addr::new(198, 41, 0, 4),
            upstream: None,
            max_referral_depth: 8,
            max_queries: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfiguration {
    pub timeout_ms: u64,
    /// Extra attempts after the first one times out.
    pub retries: u32,
    pub max_response_size: usize,
}

impl TransportConfiguration {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TransportConfiguration {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            retries: 2,
            max_response_size: 1024,
        }
    }
}

use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

pub const DEFAULT_DATA_PATH: &str = "data/habits.json";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HABIT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind: IpAddr,
    pub port: u16,
    /// Dashboard focus limit on active habits; enforced at the HTTP surface.
    pub habit_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            habit_limit: DEFAULT_HABIT_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            bind: lookup("BIND_ADDR")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.bind),
            port: lookup("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            habit_limit: lookup("HABIT_LIMIT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.habit_limit),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

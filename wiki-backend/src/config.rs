use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    /// Directory holding one `{title}.md` file per entry
    pub const ENTRIES_DIR: &str = "WIKI_ENTRIES_DIR";
    pub const STATIC_DIR: &str = "WIKI_STATIC_DIR";
    /// Entries copied into an empty store on boot
    pub const SEED_DIR: &str = "WIKI_SEED_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const ENTRIES_DIR: &str = "entries";
    pub const STATIC_DIR: &str = "static";
    pub const SEED_DIR: &str = "seed_entries";
}

/// Returns the absolute path to the wiki-backend directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// to wiki-backend/ regardless of the working directory at runtime.
pub fn backend_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub entries_dir: PathBuf,
    pub static_dir: PathBuf,
    pub seed_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in production)
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let dir_or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| backend_dir().join(default))
        };

        let port = match lookup(env_vars::PORT) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("{} is not a valid port ({:?}), using {}", env_vars::PORT, raw, defaults::PORT);
                defaults::PORT
            }),
            None => defaults::PORT,
        };

        Self {
            port,
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            entries_dir: dir_or_default(env_vars::ENTRIES_DIR, defaults::ENTRIES_DIR),
            static_dir: dir_or_default(env_vars::STATIC_DIR, defaults::STATIC_DIR),
            seed_dir: dir_or_default(env_vars::SEED_DIR, defaults::SEED_DIR),
        }
    }
}

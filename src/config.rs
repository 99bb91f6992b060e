use clap::Parser;
use std::path::PathBuf;

/// Movie watch list backend.
#[derive(Parser, Debug)]
#[command(name = "watchlist", version)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "WATCHLIST_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// sled database directory; a seeded temporary database when absent
    #[arg(long, env = "WATCHLIST_DATABASE")]
    pub database: Option<PathBuf>,

    /// bcrypt cost used to hash passwords
    #[arg(long, env = "WATCHLIST_BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn open_db(&self) -> sled::Result<sled::Db> {
        match &self.database {
            Some(path) => sled::open(path),
            None => sled::Config::new().temporary(true).open(),
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.database.is_none()
    }
}

use clap::Parser;
use rocket::figment::Figment;

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "rtasks", about = "Task manager service with deadline reminders")]
pub struct Config {
    /// SQLite file backing the local key-value store
    #[arg(long, env = "RTASKS_DB_PATH", default_value = "rtasks.db")]
    pub db_path: PathBuf,

    #[arg(long, env = "RTASKS_ADDRESS", default_value = "127.0.0.1")]
    pub address: IpAddr,

    #[arg(long, env = "RTASKS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// How often the deadline monitor scans the active user's tasks
    #[arg(
        long,
        env = "RTASKS_TICK_MILLIS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_millis: u64,

    /// Front-end files served at `/`
    #[arg(long, env = "RTASKS_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.address))
            .merge(("port", self.port))
    }
}

//! Runtime configuration, read from the environment (a `.env` file is
//! loaded first when present).

use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{error::AppErr, media::MAX_UPLOAD_BYTES};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Front-end assets served at `/`.
    pub static_dir: PathBuf,
    /// Upload store, served at `/uploads`.
    pub upload_dir: PathBuf,
    pub upload_max_bytes: u64,
    /// Total upload bytes kept on disk before the sweeper evicts old files.
    pub upload_disk_cap: u64,
    pub clean_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 3000,
            static_dir: "static".into(),
            upload_dir: "uploads".into(),
            upload_max_bytes: MAX_UPLOAD_BYTES,
            upload_disk_cap: 50 * 1024 * 1024 * 1024,
            clean_interval: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppErr> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(get: F) -> Result<Self, AppErr> {
        let d = Self::default();
        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(d.bind_addr),
            port: parse(&get, "PORT")?.unwrap_or(d.port),
            static_dir: get("STATIC_DIR").map(PathBuf::from).unwrap_or(d.static_dir),
            upload_dir: get("UPLOAD_DIR").map(PathBuf::from).unwrap_or(d.upload_dir),
            upload_max_bytes: parse(&get, "UPLOAD_MAX_BYTES")?.unwrap_or(d.upload_max_bytes),
            upload_disk_cap: parse(&get, "UPLOAD_DISK_CAP")?.unwrap_or(d.upload_disk_cap),
            clean_interval: parse(&get, "CLEAN_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(d.clean_interval),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AppErr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|e| AppErr::Config(format!("bad bind address: {e}")))
    }
}

fn parse<T: FromStr, F: Fn(&str) -> Option<String>>(get: &F, key: &str) -> Result<Option<T>, AppErr>
where
    T::Err: std::fmt::Display,
{
    get(key)
        .map(|v| v.trim().parse::<T>().map_err(|e| AppErr::Config(format!("{key}={v}: {e}"))))
        .transpose()
}

use std::{fmt::Display, fs::File, str::FromStr, sync::Mutex};

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

/// Path of a fresh log file, named after the current time.
pub fn log_file_path() -> String {
    format!(
        "./logs/nfa_min_{}.txt",
        Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Installs the global tracing subscriber described by the config. Does
/// nothing if logging is disabled. Events always go to stderr and, if
/// enabled, additionally to a log file without colors.
pub fn init_logging(config: &LoggerConfig) -> anyhow::Result<()> {
    if !*config.get_enabled() {
        return Ok(());
    }

    let level = config.get_log_level().to_level_filter();

    let file_layer = if *config.get_log_file() {
        let path = log_file_path();
        std::fs::create_dir_all("./logs").context("failed to create the log directory")?;
        let file =
            File::create(&path).with_context(|| format!("failed to create log file {}", path))?;

        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(level),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .with(file_layer)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}

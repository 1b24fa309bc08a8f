use std::{fmt::Display, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{description::UnknownStatePolicy, dfa::minimization::MinimizationAlgorithm},
    logger::LogLevel,
};

/// How the CLI prints the automata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Dot => write!(f, "dot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    log_file: bool,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

/// Settings of a minimization run. Every field is optional in the TOML file,
/// missing fields take their default.
///
/// ```toml
/// unknown_states = "permissive"
/// algorithm = "hopcroft"
/// output = "json"
/// color = false
///
/// [logger]
/// enabled = true
/// log_level = "Debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    unknown_states: UnknownStatePolicy,
    algorithm: MinimizationAlgorithm,
    output: OutputFormat,
    color: bool,
    logger: LoggerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unknown_states: UnknownStatePolicy::Strict,
            algorithm: MinimizationAlgorithm::TableFilling,
            output: OutputFormat::Table,
            color: true,
            logger: LoggerConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let file_path = file_path.as_ref();
        let canonic_path = std::fs::canonicalize(file_path)
            .with_context(|| format!("config file {} not found", file_path.display()))?;
        let content = std::fs::read_to_string(&canonic_path)?;

        Self::from_toml(&content)
            .with_context(|| format!("failed to load config {}", canonic_path.display()))
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_unknown_states(mut self, unknown_states: UnknownStatePolicy) -> Self {
        self.unknown_states = unknown_states;
        self
    }

    pub fn with_algorithm(mut self, algorithm: MinimizationAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn get_unknown_states(&self) -> &UnknownStatePolicy {
        &self.unknown_states
    }

    pub fn get_algorithm(&self) -> &MinimizationAlgorithm {
        &self.algorithm
    }

    pub fn get_output(&self) -> &OutputFormat {
        &self.output
    }

    pub fn get_color(&self) -> &bool {
        &self.color
    }

    pub fn get_logger(&self) -> &LoggerConfig {
        &self.logger
    }
}

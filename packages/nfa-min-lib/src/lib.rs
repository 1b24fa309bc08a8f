pub mod automaton;
pub mod config;
pub mod display;
pub mod error;
pub mod logger;
pub mod parser;
pub mod pipeline;
pub mod validation;

//! This module holds the configuration for the server

use std::net::IpAddr;

use actix_toolbox::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

fn default_max_json_payload_size() -> usize {
    10 * 1024 * 1024
}

/// Configuration regarding the server
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConfig {
    /// The address the server should bind to
    pub listen_address: IpAddr,
    /// The port the server should bind to
    pub listen_port: u16,
    /// The maximum size of a json body in bytes.
    ///
    /// Drawings carry rendered images, so this is way above the default of actix.
    #[serde(default = "default_max_json_payload_size")]
    pub max_json_payload_size: usize,
}

/// Configuration regarding the database
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseConfig {
    /// The host of the database
    pub host: String,
    /// The port of the database
    pub port: u16,
    /// The name of the database
    pub name: String,
    /// The user to connect as
    pub user: String,
    /// The password of the user
    pub password: String,
}

/// This struct can be parsed from the configuration file
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Configuration regarding the server
    pub server: ServerConfig,
    /// Configuration regarding the database
    pub database: DatabaseConfig,
    /// The logging configuration
    pub logging: LoggingConfig,
}

// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::env;
use std::path::PathBuf;

use crate::PLUGIN_ID;
use crate::cli::Args;

/// Directory under which the host looks for plugin sockets.
pub const PLUGINS_ROOT: &str = "/var/run/scope/plugins";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub socket_path: PathBuf,
    pub log_level: log::Level,
}

impl Config {
    /// Resolves the configuration.
    /// Priority: command line > environment > defaults
    pub fn load(args: &Args) -> Self {
        Config {
            socket_path: get_socket_path(args),
            log_level: get_log_level(args),
        }
    }
}

/// `<root>/<plugin>/<plugin>.sock`, the layout the host probes.
pub fn default_socket_path(plugin: &str) -> PathBuf {
    PathBuf::from(PLUGINS_ROOT)
        .join(plugin)
        .join(format!("{plugin}.sock"))
}

fn get_socket_path(args: &Args) -> PathBuf {
    if let Some(path) = &args.socket {
        return path.clone();
    }

    if let Ok(path) = env::var("SCOPE_DEBUGGER_SOCKET")
        && !path.is_empty()
    {
        return path.into();
    }

    default_socket_path(PLUGIN_ID)
}

/// Unknown levels silently default to Info
fn parse_log_level(level: &str) -> log::Level {
    match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "info" => log::Level::Info,
        "warn" | "warning" => log::Level::Warn,
        "error" | "critical" => log::Level::Error,
        "off" => log::Level::Error, // log has no "off" level
        _ => log::Level::Info,
    }
}

/// Priority: --log-level > SCOPE_DEBUGGER_LOG_LEVEL > LOG_LEVEL > Info
fn get_log_level(args: &Args) -> log::Level {
    if let Some(level) = &args.log_level {
        return parse_log_level(level);
    }

    env::var("SCOPE_DEBUGGER_LOG_LEVEL")
        .or_else(|_| env::var("LOG_LEVEL"))
        .map(|level| parse_log_level(&level))
        .unwrap_or(log::Level::Info)
}

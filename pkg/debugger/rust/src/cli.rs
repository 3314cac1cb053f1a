// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "scope-debugger")]
#[command(about = "Scope plugin adding debugger controls to processes and containers")]
#[command(version)]
pub struct Args {
    /// Unix socket to serve the plugin API on
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args() {
        let args = Args::try_parse_from(["scope-debugger"]).unwrap();
        assert!(args.socket.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_all_args() {
        let args = Args::try_parse_from([
            "scope-debugger",
            "--socket",
            "/tmp/plugin.sock",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.socket, Some(PathBuf::from("/tmp/plugin.sock")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["scope-debugger", "--port", "80"]).is_err());
    }
}

// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while preparing the plugin socket. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum SocketError {
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to listen on {path:?}: {source}")]
    Bind {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to marshal the report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a control action could not be performed. These are reported back
/// to the host in the response envelope, never as a transport error.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("invalid control request: {0}")]
    InvalidRequest(String),
    #[error("unknown control: {0:?}")]
    UnknownControl(String),
    #[error("cannot resolve a process id from node {0:?}")]
    InvalidNode(String),
    #[error("process {0} not found")]
    ProcessNotFound(i32),
    #[error("permission denied for process {pid} (owned by uid {owner})")]
    PermissionDenied { pid: i32, owner: u32 },
    #[error("{0} is not installed")]
    ToolNotInstalled(String),
    #[error("failed to inspect process {pid}: {source}")]
    Io { pid: i32, source: std::io::Error },
}

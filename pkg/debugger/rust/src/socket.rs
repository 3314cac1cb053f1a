// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::fs::DirBuilder;
use std::io::ErrorKind;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use tokio::net::UnixListener;

use crate::errors::SocketError;

/// Owns the plugin's socket file from bind until release.
#[derive(Debug)]
pub struct PluginSocket {
    path: PathBuf,
}

impl PluginSocket {
    /// Removes any stale socket left by an unclean shutdown, creates the parent
    /// directory and binds a listener at `path`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(path: impl Into<PathBuf>) -> Result<(Self, UnixListener), SocketError> {
        let path = path.into();

        // Best effort: a real problem with the path surfaces below.
        if let Err(e) = std::fs::remove_file(&path)
            && e.kind() != ErrorKind::NotFound
        {
            warn!("Could not remove stale socket {}: {e}", path.display());
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            DirBuilder::new()
                .recursive(true)
                .mode(0o755)
                .create(parent)
                .map_err(|source| SocketError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let listener = UnixListener::bind(&path).map_err(|source| SocketError::Bind {
            path: path.clone(),
            source,
        })?;

        info!("Listening on: unix://{}", path.display());
        Ok((PluginSocket { path }, listener))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the socket file. Consumes the manager so this happens once.
    pub fn release(self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!("Removed socket {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Socket {} already removed", self.path.display())
            }
            Err(e) => error!("Failed to remove socket {}: {e}", self.path.display()),
        }
    }
}

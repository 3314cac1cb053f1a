// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static PROC_ROOT: OnceLock<PathBuf> = OnceLock::new();

pub fn root_path() -> &'static Path {
    PROC_ROOT.get_or_init(|| {
        if let Ok(v) = env::var("HOST_PROC") {
            return v.into();
        }

        if env::var("SCOPE_DEBUGGER_CONTAINERIZED").is_ok() && Path::new("/host").exists() {
            return "/host/proc".into();
        }

        "/proc".into()
    })
}

/// Returns the uid owning `pid`, or `None` if no such process exists.
pub fn process_owner(pid: i32) -> std::io::Result<Option<u32>> {
    process_owner_in(root_path(), pid)
}

fn process_owner_in(root: &Path, pid: i32) -> std::io::Result<Option<u32>> {
    if pid <= 0 {
        return Ok(None);
    }

    match fs::metadata(root.join(pid.to_string())) {
        Ok(metadata) if metadata.is_dir() => Ok(Some(metadata.uid())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

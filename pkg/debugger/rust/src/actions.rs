// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use log::{debug, info};

use crate::errors::ControlError;
use crate::procfs;

/// A debugger that can be attached to a running process.
///
/// The handler only validates that the attach can happen: the target exists,
/// the plugin is allowed to trace it and the tool is installed. Starting the
/// debugger session itself is left to the helper container started by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebuggerTool {
    pub name: &'static str,
    pub binary: &'static str,
}

impl DebuggerTool {
    pub const fn new(name: &'static str, binary: &'static str) -> Self {
        DebuggerTool { name, binary }
    }

    pub fn attach(&self, pid: i32) -> Result<(), ControlError> {
        let owner = procfs::process_owner(pid)
            .map_err(|source| ControlError::Io { pid, source })?
            .ok_or(ControlError::ProcessNotFound(pid))?;

        check_permission(pid, owner, uzers::get_effective_uid())?;

        let path = which::which(self.binary)
            .map_err(|_| ControlError::ToolNotInstalled(self.binary.to_string()))?;
        debug!("Found {} at {}", self.name, path.display());

        info!("{} attach requested for pid {}", self.name, pid);
        Ok(())
    }
}

/// Tracing another user's process needs root.
fn check_permission(pid: i32, owner: u32, euid: u32) -> Result<(), ControlError> {
    if euid == 0 || euid == owner {
        Ok(())
    } else {
        Err(ControlError::PermissionDenied { pid, owner })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::cast_possible_wrap)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_process() {
        let tool = DebuggerTool::new("sh", "sh");
        let err = tool.attach(i32::MAX).unwrap_err();
        assert!(matches!(err, ControlError::ProcessNotFound(pid) if pid == i32::MAX));
    }

    #[test]
    fn test_missing_tool() {
        let tool = DebuggerTool::new("nope", "scope-debugger-no-such-tool");
        let err = tool.attach(std::process::id() as i32).unwrap_err();
        assert!(matches!(err, ControlError::ToolNotInstalled(bin) if bin == "scope-debugger-no-such-tool"));
    }

    #[test]
    fn test_attach_to_own_process() {
        let tool = DebuggerTool::new("sh", "sh");
        tool.attach(std::process::id() as i32).unwrap();
    }

    #[test]
    fn test_permission() {
        assert!(check_permission(1, 1000, 0).is_ok());
        assert!(check_permission(1, 1000, 1000).is_ok());
        let err = check_permission(1, 0, 1000).unwrap_err();
        assert!(matches!(err, ControlError::PermissionDenied { pid: 1, owner: 0 }));
    }
}

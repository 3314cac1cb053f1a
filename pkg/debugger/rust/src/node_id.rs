// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use crate::errors::ControlError;

/// Separator used by the host between the scope and the local id of a node,
/// e.g. `<host id>;<pid>` for process nodes.
const SCOPE_DELIMITER: char = ';';

/// Resolves the process id targeted by a control request.
///
/// Process nodes carry the pid as their last component. Container nodes do
/// not, and resolving them needs a container runtime this plugin does not talk
/// to, so they are rejected.
pub fn resolve_pid(node_id: &str) -> Result<i32, ControlError> {
    let local = node_id
        .rsplit(SCOPE_DELIMITER)
        .next()
        .unwrap_or(node_id)
        .trim();

    match local.parse::<i32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(ControlError::InvalidNode(node_id.to_string())),
    }
}

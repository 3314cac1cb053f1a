// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

//! Static table of the controls offered by the plugin and their handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::actions::DebuggerTool;
use crate::errors::ControlError;
use crate::report::{Control, DEBUGGER_TABLE_PREFIX};

/// Action bound to a control, invoked with the target process id.
pub type ControlHandler = Arc<dyn Fn(i32) -> Result<(), ControlError> + Send + Sync>;

const TOOLBOX_IMAGE: &str = "albanc/toolbox";

const GDB: DebuggerTool = DebuggerTool::new("GDB", "gdb");
const STRACE: DebuggerTool = DebuggerTool::new("strace", "strace");
const DELVE: DebuggerTool = DebuggerTool::new("Delve", "dlv");

/// A control descriptor paired with its handler.
#[derive(Clone)]
pub struct ExtControl {
    pub control: Control,
    pub handler: ControlHandler,
}

impl ExtControl {
    pub fn new<F>(control: Control, handler: F) -> Self
    where
        F: Fn(i32) -> Result<(), ControlError> + Send + Sync + 'static,
    {
        ExtControl {
            control,
            handler: Arc::new(handler),
        }
    }
}

impl fmt::Debug for ExtControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtControl")
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

fn debugger_control(suffix: &str, tool: DebuggerTool, icon: &str, rank: i32) -> ExtControl {
    ExtControl::new(
        Control {
            id: format!("{DEBUGGER_TABLE_PREFIX}{suffix}"),
            human: tool.name.to_string(),
            icon: icon.to_string(),
            rank,
            always_propagated: true,
            start_image: Some(TOOLBOX_IMAGE.to_string()),
        },
        move |pid| tool.attach(pid),
    )
}

/// Every control supported by the plugin.
pub fn default_controls() -> Vec<ExtControl> {
    vec![
        debugger_control("gdb", GDB, "fa-bug", 24),
        debugger_control("strace", STRACE, "fa-terminal", 25),
        debugger_control("delve", DELVE, "fa-code", 26),
    ]
}

/// Read-only lookup table built once at startup.
#[derive(Debug, Clone)]
pub struct ControlRegistry {
    entries: BTreeMap<String, ExtControl>,
}

impl ControlRegistry {
    /// Builds the registry. Control ids must be unique.
    pub fn new(controls: Vec<ExtControl>) -> Self {
        let count = controls.len();
        let entries: BTreeMap<_, _> = controls
            .into_iter()
            .map(|c| (c.control.id.clone(), c))
            .collect();
        debug_assert_eq!(entries.len(), count, "duplicate control id");
        ControlRegistry { entries }
    }

    /// Control id to descriptor, as published in topologies.
    pub fn controls(&self) -> BTreeMap<String, Control> {
        self.entries
            .iter()
            .map(|(id, c)| (id.clone(), c.control.clone()))
            .collect()
    }

    pub fn handler(&self, id: &str) -> Option<&ControlHandler> {
        self.entries.get(id).map(|c| &c.handler)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ControlRegistry {
    fn default() -> Self {
        Self::new(default_controls())
    }
}

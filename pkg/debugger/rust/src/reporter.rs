// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

use std::sync::Arc;

use crate::PLUGIN_ID;
use crate::controls::ControlRegistry;
use crate::errors::ReportError;
use crate::report::{PluginSpec, Report, Topology};

/// Builds the snapshot served on `/report`.
///
/// Nothing is cached between calls; every report is assembled from the
/// read-only registry.
#[derive(Debug, Clone)]
pub struct Reporter {
    registry: Arc<ControlRegistry>,
}

impl Reporter {
    pub fn new(registry: Arc<ControlRegistry>) -> Self {
        Reporter { registry }
    }

    pub fn plugin_spec() -> PluginSpec {
        PluginSpec {
            id: PLUGIN_ID.to_string(),
            label: "Debugger".to_string(),
            description: "Add buttons to run debugger tools: GDB, strace, delve".to_string(),
            interfaces: vec!["reporter".to_string(), "controller".to_string()],
            api_version: "1".to_string(),
        }
    }

    pub fn report(&self) -> Report {
        // Processes and containers advertise the same controls.
        let report = Report {
            process: Topology::with_controls(self.registry.controls()),
            container: Topology::with_controls(self.registry.controls()),
            plugins: vec![Self::plugin_spec()],
        };
        debug_assert!(report.process.dangling_controls().is_empty());
        debug_assert!(report.container.dangling_controls().is_empty());
        report
    }

    pub fn raw_report(&self) -> Result<Vec<u8>, ReportError> {
        Ok(serde_json::to_vec(&self.report())?)
    }
}

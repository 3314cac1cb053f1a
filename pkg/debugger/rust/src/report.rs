// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

//! Wire types of the Scope plugin report.
//!
//! Field names are part of the host protocol and must not change. Maps are
//! ordered so that serialized output is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Prefix shared by every control this plugin advertises.
pub const DEBUGGER_TABLE_PREFIX: &str = "debugger-";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Process")]
    pub process: Topology,
    #[serde(rename = "Container")]
    pub container: Topology,
    #[serde(rename = "Plugins")]
    pub plugins: Vec<PluginSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub nodes: BTreeMap<String, Node>,
    #[serde(default)]
    pub controls: BTreeMap<String, Control>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata_templates: BTreeMap<String, MetadataTemplate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub table_templates: BTreeMap<String, TableTemplate>,
}

impl Topology {
    pub fn with_controls(controls: BTreeMap<String, Control>) -> Self {
        Topology {
            controls,
            ..Default::default()
        }
    }

    /// Control ids referenced by nodes but missing from the control table.
    pub fn dangling_controls(&self) -> Vec<&str> {
        self.nodes
            .values()
            .flat_map(|node| node.latest_controls.keys())
            .filter(|id| !self.controls.contains_key(*id))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableTemplate {
    pub id: String,
    pub label: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub id: String,
    /// Human-readable descriptor for this row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// If > 0, the host truncates the value to this length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncate: Option<u32>,
    #[serde(
        rename = "dataType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    /// Where the host reads the value from on a report node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(
        rename = "latestControls",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub latest_controls: BTreeMap<String, ControlEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub latest: BTreeMap<String, StringEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: ControlData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlData {
    pub dead: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringEntry {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: String,
}

/// Static descriptor of an action the host can offer on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub human: String,
    pub icon: String,
    /// Display ordering, lower ranks first. Passed through unmodified.
    pub rank: i32,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub always_propagated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub interfaces: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
}

// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
#![deny(clippy::undocumented_unsafe_blocks)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

mod actions;
pub mod cli;
pub mod config;
pub mod controls;
mod errors;
mod node_id;
mod procfs;
pub mod report;
pub mod reporter;
pub mod server;
pub mod socket;

/// Name under which the plugin registers with the host.
pub const PLUGIN_ID: &str = "scope-debugger";

// Re-export the public API
pub use controls::{ControlHandler, ControlRegistry, ExtControl};
pub use errors::{ControlError, ReportError, SocketError};
pub use reporter::Reporter;
pub use server::Plugin;
pub use socket::PluginSocket;

// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2025-present Datadog, Inc.

//! HTTP endpoints of the plugin: `GET /report` and `POST /control`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::net::UnixStream;

use crate::controls::ControlRegistry;
use crate::errors::{ControlError, ReportError};
use crate::node_id::resolve_pid;
use crate::reporter::Reporter;

type HttpResponse = Response<BoxBody<Bytes, std::io::Error>>;

static NOTFOUND: &[u8] = b"Not found";

/// Control invocation sent by the host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ControlRequest {
    #[serde(rename = "AppID", default)]
    pub app_id: String,
    #[serde(rename = "NodeID")]
    pub node_id: String,
    #[serde(rename = "Control")]
    pub control: String,
    #[serde(rename = "ControlArgs", default)]
    pub control_args: BTreeMap<String, String>,
}

/// Envelope answered on `/control`. `error` is absent on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct Plugin {
    reporter: Reporter,
    registry: Arc<ControlRegistry>,
}

impl Plugin {
    pub fn new(registry: Arc<ControlRegistry>) -> Self {
        Plugin {
            reporter: Reporter::new(registry.clone()),
            registry,
        }
    }

    pub async fn handle_request<B>(&self, req: Request<B>) -> Result<HttpResponse>
    where
        B: Body,
        B::Error: Display,
    {
        match (req.method(), req.uri().path()) {
            (&Method::GET, "/report") => {
                debug!("Handling /report request");
                self.report()
            }
            (&Method::POST, "/control") => {
                info!("Handling /control request");
                self.control(req).await
            }
            _ => {
                info!(
                    "{} Request to unknown endpoint: {}",
                    req.method(),
                    req.uri().path()
                );
                not_found()
            }
        }
    }

    fn report(&self) -> Result<HttpResponse> {
        report_response(self.reporter.raw_report())
    }

    async fn control<B>(&self, req: Request<B>) -> Result<HttpResponse>
    where
        B: Body,
        B::Error: Display,
    {
        let result = match req.collect().await {
            Ok(body) => self.dispatch(&body.to_bytes()),
            Err(e) => Err(ControlError::InvalidRequest(format!(
                "failed to read request body: {e}"
            ))),
        };
        send_response(result)
    }

    /// Parses a control request, looks up its handler and runs it against the
    /// process behind the node.
    pub fn dispatch(&self, body: &[u8]) -> Result<(), ControlError> {
        let request: ControlRequest = serde_json::from_slice(body)
            .map_err(|e| ControlError::InvalidRequest(e.to_string()))?;

        let handler = self
            .registry
            .handler(&request.control)
            .ok_or_else(|| ControlError::UnknownControl(request.control.clone()))?;
        let pid = resolve_pid(&request.node_id)?;

        info!(
            "Running control {} on node {} (pid {})",
            request.control, request.node_id, pid
        );
        handler(pid)
    }
}

fn report_response(raw: Result<Vec<u8>, ReportError>) -> Result<HttpResponse> {
    match raw {
        Ok(raw) => json_response(raw),
        Err(e) => {
            let msg = format!("error: failed to get raw report: {e}");
            error!("{msg}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

fn send_response(result: Result<(), ControlError>) -> Result<HttpResponse> {
    let res = ControlResponse {
        error: result.err().map(|e| {
            warn!("Control failed: {e}");
            e.to_string()
        }),
    };

    match serde_json::to_vec(&res) {
        Ok(raw) => json_response(raw),
        Err(e) => {
            error!("Internal server error: {e}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn full(body: impl Into<Bytes>) -> BoxBody<Bytes, std::io::Error> {
    Full::new(body.into()).map_err(|e| match e {}).boxed()
}

fn json_response(raw: Vec<u8>) -> Result<HttpResponse> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(full(raw))
        .map_err(|e| anyhow!("Failed to build response: {}", e))
}

fn text_response(status: StatusCode, msg: String) -> Result<HttpResponse> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(full(msg))
        .map_err(|e| anyhow!("Failed to build {} response: {}", status, e))
}

fn not_found() -> Result<HttpResponse> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .body(full(NOTFOUND))
        .map_err(|e| anyhow!("Failed to build not found response: {}", e))
}

fn internal_server_error() -> HttpResponse {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(full(&b"Internal Server Error"[..]))
        .unwrap_or_else(|_| {
            // Last resort if even error response building fails
            Response::new(full(&b"Error"[..]))
        })
}

/// Serves HTTP/1 requests on one accepted connection until the peer closes it.
pub async fn serve_connection(plugin: Arc<Plugin>, stream: UnixStream) {
    // Use an adapter to access something implementing `tokio::io` traits as if they
    // implement `hyper::rt` IO traits.
    let io = TokioIo::new(stream);

    let service = service_fn(move |req| {
        let plugin = plugin.clone();
        async move {
            Ok::<_, anyhow::Error>(plugin.handle_request(req).await.unwrap_or_else(|e| {
                error!("Request handling failed: {e}");
                internal_server_error()
            }))
        }
    });

    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        error!("Error serving connection: {err}");
    }
}

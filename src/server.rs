//! Minimal HTTP/1.1 server for the precomputed dashboard.
//!
//! The page and JSON summary are rendered once at startup and shared
//! read-only across connection tasks.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, debug, info, warn};

use crate::analyzers::types::SummaryReport;
use crate::render::{PageSpec, render_page};

/// Upper bound on request head lines read before answering.
const MAX_HEADER_LINES: usize = 100;

struct Response<'a> {
    status: &'a str,
    content_type: &'a str,
    body: &'a str,
}

/// Everything the server hands out, rendered ahead of time.
#[derive(Debug)]
pub struct Dashboard {
    pub page: String,
    pub summary_json: String,
}

impl Dashboard {
    pub fn build(report: &SummaryReport, spec: &PageSpec) -> Result<Self> {
        Ok(Self {
            page: render_page(&report.rows, spec)?,
            summary_json: serde_json::to_string_pretty(report)?,
        })
    }

    fn route(&self, method: &str, path: &str) -> Response<'_> {
        if method != "GET" && method != "HEAD" {
            return Response {
                status: "405 Method Not Allowed",
                content_type: "text/plain; charset=utf-8",
                body: "method not allowed\n",
            };
        }

        match path {
            "/" | "/index.html" => Response {
                status: "200 OK",
                content_type: "text/html; charset=utf-8",
                body: &self.page,
            },
            "/summary.json" => Response {
                status: "200 OK",
                content_type: "application/json",
                body: &self.summary_json,
            },
            "/healthz" => Response {
                status: "200 OK",
                content_type: "text/plain; charset=utf-8",
                body: "ok\n",
            },
            _ => Response {
                status: "404 Not Found",
                content_type: "text/plain; charset=utf-8",
                body: "not found\n",
            },
        }
    }
}

/// Accepts connections until the listener fails, one task per connection.
pub async fn serve(listener: TcpListener, dashboard: Arc<Dashboard>) -> Result<()> {
    info!(addr = %listener.local_addr()?, "Dashboard listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        let dashboard = dashboard.clone();
        let span = tracing::debug_span!("connection", peer = %peer);

        tokio::spawn(
            async move {
                if let Err(e) = handle_connection(stream, &dashboard).await {
                    warn!(error = %e, "Connection failed");
                }
            }
            .instrument(span),
        );
    }
}

async fn handle_connection(mut stream: TcpStream, dashboard: &Dashboard) -> Result<()> {
    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Ok(());
    }

    // Drain the header block; nothing in it changes the response.
    let mut line = String::new();
    for _ in 0..MAX_HEADER_LINES {
        line.clear();
        if reader.read_line(&mut line).await? == 0 || line.trim_end().is_empty() {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/");

    let response = dashboard.route(method, path);
    debug!(method, path, status = response.status, "Request");

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.content_type,
        response.body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    if method != "HEAD" {
        writer.write_all(response.body.as_bytes()).await?;
    }
    writer.shutdown().await?;

    Ok(())
}

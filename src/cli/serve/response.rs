//! HTTP response handlers.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::cli::meta::to_json;
use crate::seo::{MetadataRecord, Outcome, Resolved, render_document};
use crate::utils::mime::types::{HTML, JSON, PLAIN};

/// HTTP status for a resolution outcome.
pub const fn status_for(outcome: Outcome) -> u16 {
    match outcome {
        Outcome::Found => 200,
        Outcome::NotFound => 404,
        Outcome::Failed => 500,
    }
}

/// Respond with an HTML preview document.
pub fn respond_page(request: Request, resolved: &Resolved) -> Result<()> {
    let body = render_document(&resolved.record).into_bytes();
    respond_resolved(request, resolved, HTML, body)
}

/// Respond with the metadata record as JSON.
pub fn respond_meta(request: Request, resolved: &Resolved) -> Result<()> {
    let body = meta_body(&resolved.record)?;
    respond_resolved(request, resolved, JSON, body)
}

fn respond_resolved(
    request: Request,
    resolved: &Resolved,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let status = status_for(resolved.outcome);
    let outcome = make_header("X-Blogmeta-Outcome", resolved.outcome.as_str())?;

    if is_head_request(&request) {
        return send_head(request, status, content_type, Some(outcome));
    }
    send_body(request, status, content_type, body, Some(outcome))
}

fn meta_body(record: &MetadataRecord) -> Result<Vec<u8>> {
    Ok(to_json(record, true)?.into_bytes())
}

/// Respond with a plain 404 (URL outside the blog routes).
pub fn respond_not_found(request: Request) -> Result<()> {
    respond_plain(request, 404, "404 Not Found")
}

/// Respond with 405 (anything but GET/HEAD).
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    respond_plain(request, 405, "405 Method Not Allowed")
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    respond_plain(request, 503, "503 Service Unavailable")
}

fn respond_plain(request: Request, status: u16, message: &str) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, PLAIN, None);
    }
    send_body(request, status, PLAIN, message.as_bytes().to_vec(), None)
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

pub fn is_read_request(request: &Request) -> bool {
    matches!(request.method(), Method::Get | Method::Head)
}

fn send_head(
    request: Request,
    status: u16,
    content_type: &'static str,
    extra: Option<Header>,
) -> Result<()> {
    let mut response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    if let Some(header) = extra {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    extra: Option<Header>,
) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    if let Some(header) = extra {
        response.add_header(header);
    }
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}

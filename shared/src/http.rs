//! HTTP helpers for Lambda functions.

use lambda_http::request::RequestContext;
use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;

use crate::models::ErrorBody;

/// CORS headers attached to every response so the form can post cross-origin.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
    ),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
];

/// Request path with the API Gateway stage removed.
///
/// REST API events reach the function as `/{stage}/api/contact`; routing
/// matches on the path the client requested.
pub fn route_path(event: &Request) -> &str {
    let path = event.uri().path();
    let stage = match event.request_context_ref() {
        Some(RequestContext::ApiGatewayV1(ctx)) => ctx.stage.as_deref(),
        Some(RequestContext::ApiGatewayV2(ctx)) => ctx.stage.as_deref(),
        _ => None,
    };

    let unstaged = stage
        .filter(|stage| !stage.is_empty())
        .and_then(|stage| path.strip_prefix('/')?.strip_prefix(stage));

    match unstaged {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Create a response with CORS headers and an optional content type.
pub fn cors_response(
    status: u16,
    content_type: Option<&str>,
    body: Body,
) -> Result<Response<Body>, lambda_http::Error> {
    let mut builder = Response::builder().status(status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    Ok(builder.body(body)?)
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(status: u16, data: &T) -> Result<Response<Body>, lambda_http::Error> {
    cors_response(
        status,
        Some("application/json"),
        Body::from(serde_json::to_string(data)?),
    )
}

/// Create an error response with the given status code and message.
pub fn error_response(status: u16, message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(status, &ErrorBody { error: message.into() })
}

/// Empty 200 answer to a CORS preflight.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    cors_response(200, None, Body::Empty)
}

//! AWS Lambda handler for the time-to-goal API
//!
//! Accepts `{initial_balance, monthly_contribution, monthly_interest_rate, target_balance}`
//! and returns `{years, remaining_months, table}` with the yearly gross balances.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use goal_projection::api::{simulate_json, ApiError};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let text = serde_json::to_string(body)?;
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(text))?)
}

fn error_response(status: u16, message: String) -> Result<Response<Body>, Error> {
    json_response(status, &ErrorBody { error: message })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    match event.method().as_str() {
        // CORS preflight
        "OPTIONS" => {
            return Ok(with_cors(Response::builder())
                .status(200)
                .body(Body::Empty)?);
        }
        "POST" => {}
        other => {
            return error_response(405, format!("method {other} not allowed"));
        }
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    match simulate_json(&body_str) {
        Ok(response) => {
            info!(
                "simulated {} years {} months in {:?}",
                response.years,
                response.remaining_months,
                start.elapsed()
            );
            json_response(200, &response)
        }
        Err(err) => {
            warn!("rejected request: {err}");
            let status = err.status_code();
            let message = match err {
                ApiError::MalformedRequest(e) => format!("Invalid JSON: {e}"),
                ApiError::Simulation(e) => e.to_string(),
            };
            error_response(status, message)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

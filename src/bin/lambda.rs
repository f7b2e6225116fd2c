//! AWS Lambda HTTP entry point
//!
//! Routes API Gateway / function URL events to `api::handle_request`:
//! POST /calculate and POST /custom-growth.

use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use reverse_dcf::{handle_request, ServiceConfig};

/// Path as the client sent it. API Gateway REST events carry the stage
/// (`/prod/calculate`) in the URI; the raw path does not.
fn route_path(event: &Request) -> String {
    let raw = event.raw_http_path().to_string();
    if raw.is_empty() {
        event.uri().path().to_string()
    } else {
        raw
    }
}

async fn function_handler(event: Request, config: &ServiceConfig) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let path = route_path(&event);
    let body: &[u8] = event.body();

    let rendered = handle_request(method, &path, body, config);

    let mut builder = Response::builder().status(rendered.status);
    for (name, value) in &rendered.headers {
        builder = builder.header(*name, value.as_str());
    }
    let body = if rendered.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(rendered.body)
    };
    Ok(builder.body(body)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = ServiceConfig::from_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .format_timestamp(None)
        .init();
    log::info!("Starting reverse DCF function (CORS origin: {})", config.cors_allow_origin);

    let config = &config;
    run(service_fn(move |event: Request| async move {
        function_handler(event, config).await
    }))
    .await
}

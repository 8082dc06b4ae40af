// src/adapter/http.rs
// HTTP entry point for the scan use case

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::Serialize;
use serde_json::json;

use crate::application::dto::{ApplicationError, ErrorResponseDto, ScanRequestDto};
use crate::application::usecase::ScanUseCase;
use crate::domain::errors::AppResult;
use crate::domain::model::{ScanRequest, ScanResult};

pub struct ScanHandler {
    use_case: Arc<dyn ScanUseCase>,
    scan_timeout: Option<Duration>,
}

impl ScanHandler {
    pub fn new(use_case: Arc<dyn ScanUseCase>, scan_timeout: Option<Duration>) -> Self {
        Self {
            use_case,
            scan_timeout,
        }
    }

    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        match (req.method(), req.uri().path()) {
            (&Method::POST, "/scan") => self.scan(req).await,
            (&Method::GET, "/health") => json_response(StatusCode::OK, &json!({ "status": "ok" })),
            (_, "/scan") | (_, "/health") => {
                error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
            }
            _ => error_response(StatusCode::NOT_FOUND, "not found"),
        }
    }

    async fn scan(&self, req: Request<Body>) -> Response<Body> {
        match self.run_scan(req).await {
            Ok(result) => json_response(StatusCode::OK, &result),
            Err(e) => {
                let status = status_for(&e);
                if status.is_server_error() {
                    log::error!("Scan failed: {}", e);
                } else {
                    log::warn!("Rejected scan request: {}", e);
                }
                error_response(status, &e.to_string())
            }
        }
    }

    async fn run_scan(&self, req: Request<Body>) -> Result<ScanResult, ApplicationError> {
        let bytes = hyper::body::to_bytes(req.into_body())
            .await
            .map_err(|e| ApplicationError::Validation(format!("unreadable body: {}", e)))?;
        let dto: ScanRequestDto = serde_json::from_slice(&bytes)?;
        let request = ScanRequest::try_from(dto)?;

        match self.scan_timeout {
            Some(limit) => tokio::time::timeout(limit, self.use_case.run_scan(request))
                .await
                .map_err(|_| ApplicationError::Timeout(limit))?,
            None => self.use_case.run_scan(request).await,
        }
    }
}

fn status_for(error: &ApplicationError) -> StatusCode {
    match error {
        ApplicationError::Validation(_) | ApplicationError::JsonError(_) => StatusCode::BAD_REQUEST,
        ApplicationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ApplicationError::Ticker { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            log::error!("Failed to serialize response: {}", e);
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response<Body> {
    json_response(
        status,
        &ErrorResponseDto {
            detail: detail.to_string(),
        },
    )
}

/// Serve `handler` on `addr` until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, handler: Arc<ScanHandler>, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_conn| {
        let handler = handler.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let handler = handler.clone();
                async move { Ok::<_, Infallible>(handler.handle(req).await) }
            }))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_svc);
    log::info!("Listening on http://{}", addr);

    server.with_graceful_shutdown(shutdown).await?;
    Ok(())
}

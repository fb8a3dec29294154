use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ErrorReport;

/// Logs every server error once, tagged with the id returned to the client.
pub async fn error_reporting_middleware(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    let Some(report) = response.extensions_mut().remove::<ErrorReport>() else {
        return response;
    };

    tracing::error!(
        error_id = %report.id,
        status_code = report.status_code,
        public_code = %report.public_code,
        method = %method,
        path = %path,
        "{}", report.summary
    );
    if let Some(details) = report.details {
        tracing::error!(error_id = %report.id, "details: {}", details);
    }

    response
}

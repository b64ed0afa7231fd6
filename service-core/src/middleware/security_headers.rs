use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Route prefixes that only ever return JSON or plain text.
const API_PATHS: &[&str] = &["/generate-floorplan", "/health", "/api/", "/metrics"];

fn is_api_route(path: &str) -> bool {
    API_PATHS.iter().any(|prefix| path.starts_with(prefix))
}

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_api = is_api_route(req.uri().path());

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );

    if is_api {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("DENY"),
        );
    } else {
        // Frontend bundle: own scripts and styles, generated plan images come from remote hosts.
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data: https:; \
                 font-src 'self' data:; \
                 connect-src 'self'",
            ),
        );
        headers.insert(
            header::X_FRAME_OPTIONS,
            header::HeaderValue::from_static("SAMEORIGIN"),
        );
    }

    response
}

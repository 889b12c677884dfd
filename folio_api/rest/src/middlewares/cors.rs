use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use super::request_id::REQUEST_ID_HEADER;

/// Allows browsers on `allowed_origins` to call the api. An empty list allows
/// any origin.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origins: &[String],
) -> impl FnOnce(Router<S>) -> Router<S> {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed_origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(%origin, "ignoring invalid allowed origin"))
                .ok()
        }))
    };

    let layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([REQUEST_ID_HEADER]);

    move |router| router.layer(layer)
}

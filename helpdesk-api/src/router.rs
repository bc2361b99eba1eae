use axum::{
    http::{header, HeaderName, Method},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    app_state::AppState,
    auth::{ROLES_HEADER, USER_ID_HEADER},
    routes,
};

pub fn create(app_state: AppState, app_url: String) -> Router<()> {
    let app = Router::new()
        .nest("/healthz", routes::health::router())
        .nest(
            "/tickets",
            routes::tickets::router().merge(routes::comments::router()),
        )
        .nest("/suggestions", routes::suggestions::router())
        .nest("/workflows", routes::feedback::router())
        .nest("/chatbot", routes::chat::router())
        .nest("/ai", routes::documents::router())
        .nest("/admin", routes::admin::router());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(ROLES_HEADER),
        ])
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_url
        }));

    app.with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

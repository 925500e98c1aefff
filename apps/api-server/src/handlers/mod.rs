//! HTTP handlers and route configuration.

mod banned_words;
mod gate;
mod health;
mod moderation;
mod reports;
mod screen;

use actix_web::web;

use palisade_core::moderation::ActionClass;

use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
///
/// `/gate/check` and `/screen` are service-to-service calls from the forum
/// backend and are not wrapped by the middleware; the forum enforces its own
/// per-user classes through the gate. The user-facing write routes are
/// wrapped with the default class.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let guard = || {
        RateLimitMiddleware::new(
            state.rate_limiter.clone(),
            state.tokens.clone(),
            ActionClass::Default,
        )
    };

    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Service-to-service surface for the forum backend
            .route("/gate/check", web::post().to(gate::check))
            .route("/screen", web::post().to(screen::screen_content))
            // User-facing write routes
            .service(
                web::scope("/reports")
                    .wrap(guard())
                    .route("", web::post().to(reports::file_report)),
            )
            .service(
                web::scope("/moderation")
                    .wrap(guard())
                    .route("/posts/{id}", web::post().to(moderation::moderate_post)),
            )
            .service(
                web::scope("/admin/banned-words")
                    .wrap(guard())
                    .route("", web::get().to(banned_words::list))
                    .route("", web::post().to(banned_words::add))
                    .route("/{id}", web::delete().to(banned_words::remove)),
            ),
    );
}

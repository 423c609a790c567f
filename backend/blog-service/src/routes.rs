/// Route tree. Reads are open; every scope keeps its mutating routes inside
/// a nested scope wrapped with the JWT middleware, so unauthenticated writes
/// stop at 401 before any handler runs.
use actix_web::web;

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/token")
                    .route("", web::post().to(handlers::obtain_token))
                    .route("/refresh", web::post().to(handlers::refresh_token)),
            )
            .service(web::scope("/users").route("", web::post().to(handlers::register)))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(handlers::list_posts))
                    .route("/{id}", web::get().to(handlers::get_post))
                    .route("/{post_id}/comments", web::get().to(handlers::list_comments))
                    .route(
                        "/{post_id}/comments/{id}",
                        web::get().to(handlers::get_comment),
                    )
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("", web::post().to(handlers::create_post))
                            .route("/{id}", web::put().to(handlers::update_post))
                            .route("/{id}", web::patch().to(handlers::patch_post))
                            .route("/{id}", web::delete().to(handlers::delete_post))
                            .route(
                                "/{post_id}/comments",
                                web::post().to(handlers::create_comment),
                            )
                            .route(
                                "/{post_id}/comments/{id}",
                                web::put().to(handlers::update_comment),
                            )
                            .route(
                                "/{post_id}/comments/{id}",
                                web::patch().to(handlers::patch_comment),
                            )
                            .route(
                                "/{post_id}/comments/{id}",
                                web::delete().to(handlers::delete_comment),
                            ),
                    ),
            )
            .service(
                web::scope("/follow")
                    .route("", web::get().to(handlers::list_follows))
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("", web::post().to(handlers::create_follow))
                            .route("/{id}", web::delete().to(handlers::delete_follow)),
                    ),
            )
            .service(
                web::scope("/group")
                    .route("", web::get().to(handlers::list_groups))
                    .route("/{id}", web::get().to(handlers::get_group))
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("", web::post().to(handlers::create_group)),
                    ),
            ),
    );
}

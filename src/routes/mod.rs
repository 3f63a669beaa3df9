pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{web, Scope};

use crate::auth::{AuthMiddleware, TokenService};

/// Builds the `/api` service tree.
///
/// `register` and `login` sit outside the auth middleware; every task route
/// lives in the nested scope it wraps, so the token check applies uniformly
/// to all of them.
pub fn api(tokens: TokenService) -> Scope {
    web::scope("/api")
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("")
                .wrap(AuthMiddleware::new(tokens))
                .service(tasks::get_tasks)
                .service(tasks::post_task)
                .service(tasks::update_task_status)
                .service(tasks::update_task_details)
                .service(tasks::delete_task),
        )
}

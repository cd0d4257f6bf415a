//! HTTP inbound adapter exposing the task, category and account endpoints.
//!
//! Handlers hand their [`crate::domain::OperationResult`] to the
//! [`translator::ResponseTranslator`] and never pick failure statuses
//! themselves.

use actix_web::web;

pub mod accounts;
pub mod auth;
pub mod cancellation;
pub mod categories;
pub mod error;
pub mod health;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod translator;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` route plus the extractor error handlers.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use taskboard::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    validation::extractor_config(cfg);
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(accounts::remove_account)
        .service(tasks::list_tasks)
        .service(tasks::create_task)
        .service(tasks::get_task)
        .service(tasks::update_task)
        .service(tasks::delete_task)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::rename_category)
        .service(categories::delete_category);
}

mod help;
mod subscription;

pub use help::*;
pub use subscription::*;

use actix_web::{HttpResponse, Responder};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
}

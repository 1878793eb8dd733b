use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{form::FormSettings, gateway::SubmissionGateway, routes};

pub fn run(
    listener: TcpListener,
    gateway: web::Data<dyn SubmissionGateway>,
    settings: web::Data<FormSettings>,
) -> Result<Server, std::io::Error> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(gateway.clone())
            .app_data(settings.clone())
            .route("/health_check", web::get().to(routes::health_check))
            .route("/subscribe", web::post().to(routes::subscribe))
            .route("/help", web::get().to(routes::help))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

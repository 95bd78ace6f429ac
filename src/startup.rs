use std::net::TcpListener;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::configuration::Settings;
use crate::routes::{company_route, default_route};
use crate::services::{ModelBackend, SearchClient};

pub fn run(
    listener: TcpListener,
    settings: Settings,
    http_client: reqwest::Client,
    search_client: SearchClient,
    model_backend: ModelBackend,
) -> Result<Server, std::io::Error> {
    let settings = web::Data::new(settings);
    let http_client = web::Data::new(http_client);
    let search_client = web::Data::new(search_client);
    let model_backend = web::Data::new(model_backend);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(default_route::default)
            .service(web::scope("/company").service(company_route::extract_companies))
            .app_data(settings.clone())
            .app_data(http_client.clone())
            .app_data(search_client.clone())
            .app_data(model_backend.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

use actix_web::HttpServer;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

mod app;
mod comment;
mod config;
mod database;
mod middleware;
mod post;
mod router;
mod user;
mod utils;

#[cfg(test)]
mod test_utils;

use app::create_app;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger with environment variable support
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Exits the process when the config file is missing or malformed
    config::load();
    let settings = config::get_config();

    let pool = database::connect(&settings.database)
        .await
        .map_err(std::io::Error::other)?;
    database::migrate(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let jwt = settings.jwt.clone();
    let server = &settings.server;

    info!("Starting server on http://{}:{}", server.host, server.port);

    HttpServer::new(move || create_app(pool.clone(), jwt.clone()))
        .bind((server.host.as_str(), server.port))?
        .run()
        .await?;

    // Log after server has started (this line will only be reached when the server shuts down)
    info!("Server has stopped");

    Ok(())
}

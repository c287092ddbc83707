use std::net::SocketAddr;
use lambda_http::{run, Error};
use tracing::info;
use book_catalog::catalog::controller::routes;
use book_catalog::catalog::factory;
use book_catalog::core::controller::AppState;
use book_catalog::core::domain::{Configuration, ServeVia};
use book_catalog::utils::logs::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Configuration::from_env();
    setup_tracing(config.log_level.as_str());

    let catalog = factory::create_catalog_service(&config).await;
    if config.seed_data {
        let added = catalog.load_seed_data().await;
        info!("seeded {} books", added);
    }

    let serve_via = config.serve_via;
    let bind_addr = config.bind_addr.to_string();
    let state = AppState::new(config, catalog);

    match serve_via {
        ServeVia::Lambda => run(routes::<lambda_http::Body>(state)).await,
        ServeVia::Http => {
            let addr: SocketAddr = bind_addr.parse()?;
            info!("listening on {}", addr);
            let app = routes::<axum::body::Body>(state);
            axum::Server::bind(&addr).serve(app.into_make_service()).await?;
            Ok(())
        }
    }
}

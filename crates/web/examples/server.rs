//! The reference deployment: a handful of plain-text routes on port 8000.
//!
//! ```text
//! cargo run -p bare-web --example server -- 127.0.0.1:8000
//! curl -i localhost:8000/
//! curl -i -X POST --data abc localhost:8000/echo
//! ```

use std::process::ExitCode;

use bare_web::router::{delete, get, post, put};
use bare_web::{Response, Router, Server, StatusCode};
use bytes::Bytes;
use http::Request;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

fn greet(request: &Request<Bytes>) -> Response {
    Response::ok(format!("Lets go, {}!", request.uri().path()))
}

fn echo(request: &Request<Bytes>) -> Response {
    Response::ok(String::from_utf8_lossy(request.body()).into_owned())
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let address = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

    let router = Router::builder()
        .route("/", get(|_: &Request<Bytes>| (StatusCode::Ok, "hello")))
        .route("/greet", get(greet))
        .route("/echo", post(echo))
        .route("/echo", put(echo))
        .route("/gone", delete(|_: &Request<Bytes>| (StatusCode::NotFound, "already deleted")))
        .build();

    let server = match Server::builder().router(router).address(address.as_str()).build() {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server configuration");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}

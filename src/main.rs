#![allow(clippy::result_large_err)]

mod auth;
mod handlers_auth;
mod handlers_todos;
mod http_error;
mod routes;
mod runtime;
mod store;
mod types;
mod validators;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

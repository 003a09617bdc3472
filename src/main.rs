//! ENS Gateway HTTP entrypoint.
//!
//! Endpoints:
//! - `GET /{sender}/{data}` – EIP-3668 CCIP-Read resolver call
//! - `GET /resolve/{name}` – direct forward lookup
//! - `GET /reverse/{address}` – direct reverse lookup
//! - `POST /internal/register` – bearer-gated subdomain registration
//! - `PUT /internal/update` – bearer-gated binding update
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `--config`/`CONFIG` selects the JSON configuration file

use std::process;

use ens_gateway::run::run;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        process::exit(1)
    }
}

// Library root
// -----------
// Blocking client for the Toast point-of-sale REST API. The binary
// (`main.rs`) wraps it in a small interactive menu.
//
// Module responsibilities:
// - `client`: token lifecycle, shared headers and the endpoint operations.
// - `auth`: client-credentials exchange.
// - `token`: flat-file persistence of the bearer token.
// - `transport`: the HTTP seam and its `reqwest` implementation.
// - `config`, `dates`, `endpoint`, `error`: supporting pieces.
// - `ui`: terminal menu used by the binary.
pub mod auth;
pub mod client;
pub mod config;
pub mod dates;
pub mod endpoint;
pub mod error;
pub mod token;
pub mod transport;
pub mod ui;

pub use client::ToastClient;
pub use config::{ClientConfig, Credentials, Environment};
pub use error::{Result, ToastError};

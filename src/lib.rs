//! # wkhtmltopdf-api
//!
//! HTTP front end for wkhtmltopdf: POST a `multipart/form-data` request with
//! `option` and `file` parts to `/` or `/pdf` and receive the rendered PDF
//! streamed back as the response body.
//!

mod api;
mod config;
mod error;
mod redact;
mod renderer;
mod request;
mod stream;

pub use api::app;
pub use config::Config;
pub use error::{ApiError, ErrorResponse};
pub use redact::redact_args;
pub use renderer::{RenderProcess, Renderer, WkhtmltopdfRenderer};
pub use request::RenderJob;

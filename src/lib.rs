//! Radix-tree HTTP request router.
//!
//! `Router` maps (method, path) to a handler and extracts `:name` / `*`
//! parameters. `Akita` is a thin async dispatch layer on top of it that turns
//! the three lookup outcomes into handler calls or 404 / 405 responses.

pub mod akita;
pub mod config;
pub mod context;
pub mod error;
pub mod request;
pub mod router;
pub mod utils;

pub use crate::akita::Akita;
pub use crate::config::RouterConfig;
pub use crate::context::Context;
pub use crate::error::{HttpError, RouterError};
pub use crate::request::{ParamSink, Params, ParamsPool};
pub use crate::router::{GenRouter, Group, Lookup, Route, Router};
pub use crate::utils::method::{Method, MethodSet};

//! # transpotrack-core
//!
//! Runtime plumbing shared by every TranspoTrack crate:
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`config`] | [`AppConfig`], layered YAML / `.env` / environment configuration |
//! | [`error`] | [`HttpError`], the JSON error envelope returned by every endpoint |
//! | [`validation`] | [`Validated`], a JSON body extractor that runs `garde` validation |
//! | [`layers`] | tracing subscriber, trace / CORS / panic / timeout layers |
//! | [`health`] | health indicator trait and the `/health` handlers |
//! | [`shutdown`] | graceful shutdown signal (Ctrl-C / SIGTERM) |

pub mod config;
pub mod error;
pub mod health;
pub mod layers;
pub mod shutdown;
pub mod types;
pub mod validation;

pub use config::{
    AppConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver,
    FromConfigValue, MissingKeyError, PropertyMeta, SecretResolver, validate_section,
};
pub use error::{error_response, FieldError, HttpError};
pub use health::{HealthIndicator, HealthState, HealthStatus};
pub use layers::{catch_panic_layer, default_cors, default_trace, init_tracing, timeout_layer};
pub use shutdown::shutdown_signal;
pub use types::{ApiResult, JsonResult};
pub use validation::Validated;

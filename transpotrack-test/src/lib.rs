//! Test support for TranspoTrack.
//!
//! - [`TestApp`]: drives an axum `Router` in-process and asserts on JSON
//!   envelopes.
//! - [`FakeDatabase`] and [`StaticVerifier`]: scripted implementations of
//!   the data-access and credential seams, so handlers can be tested
//!   without a MySQL server.

pub mod app;
pub mod fakes;

pub use app::{resolve_path, TestApp, TestRequest, TestResponse};
pub use fakes::{FakeDatabase, StaticVerifier};

//! HTTP integration tests.
//!
//! These tests exercise the full router and middleware stack in-process
//! via `tower::ServiceExt::oneshot`, without external services: the
//! database pool is created lazily against an unreachable address, so
//! any path that succeeds here did so before touching infrastructure,
//! and any path that needs it fails as a 500.

mod helpers;

mod auth_test;
mod editor_test;
mod routing_test;
mod share_test;

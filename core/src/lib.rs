//! Data-access and state core for the restaurant admin dashboard.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for every
//! backend resource the dashboard manages, and keeps one client-side store
//! per resource that coordinates its collection, selection and modal state
//! with server calls.
//!
//! # Design
//! - `ResourceClient<T>` is stateless: base URL, route table, write shape.
//!   Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and a `Transport` performs the round-trip.
//! - Entity-specific paths and payloads are configuration of that one client
//!   (see `entities`), never duplicated request code.
//! - `Store<T, X>` refetches after every write; the collection is always a
//!   server list response with soft-deleted rows dropped.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod access;
pub mod config;
pub mod dashboard;
pub mod entities;
pub mod error;
pub mod http;
pub mod mock;
pub mod resource;
pub mod store;

pub use access::{guard, resolve, Access, AuthState, Screen};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{ApiError, StoreError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use resource::{merge_patch, Entity, EntityId, IdRef, Reference, ResourceClient, Routes, Verbatim, WriteShape};
pub use store::{ModalMode, ModalState, Store};

//! # docstore - Document Storage Core
//!
//! The file lifecycle subsystem of a small-text-document storage service:
//! validated uploads, listing, content reads and deletes across two
//! independently-failing stores (a relational metadata catalog and a
//! filesystem content store), kept referentially consistent through
//! compensating actions on partial failure.
//!
//! ## Architecture Layers
//!
//! - **Domain**: value objects, the `Document` entity, domain errors
//! - **Application**: use cases and ports (interfaces)
//! - **Infrastructure**: Postgres catalog and filesystem content store
//!
//! The HTTP surface is an external collaborator: it decodes requests into the
//! plain structs in [`application::dto`], invokes a use case, and maps
//! [`application::errors::DocumentUseCaseError`] variants to responses.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{builder, dto, errors as use_case_errors, ports, use_cases, validation};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};

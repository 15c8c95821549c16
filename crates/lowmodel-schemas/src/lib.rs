//! Representative low-level document objects.
//!
//! This crate provides typed projections of common API-description objects,
//! each implementing [`Buildable`](lowmodel_core::Buildable):
//! - [`base`]: objects shared by every version (`Tag`, `ExternalDoc`)
//! - [`v2`]: version 2 responses, response tables and OAuth2 scopes
//! - [`v3`]: version 3 responses and callbacks plus the objects they nest
//!
//! [`LowObject`] is the closed set of all of them, selected by [`ObjectKind`].

#![deny(missing_docs)]

pub mod base;
pub mod kind;
pub mod labels;
pub mod v2;
pub mod v3;

pub use base::{ExternalDoc, Tag};
pub use kind::{build_object, LowObject, ObjectKind, UnknownKind};

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes reconciliation logic for nodenet resources.
//!
//! - [`nodeset`] - Network identity of a `NodeSet`: IP reservations, DNS records, conditions
//! - [`repository`] - Typed store access for the kinds a pass touches
//! - [`resources`] - Generic create-or-patch and child metadata helpers
//! - [`status`] - Condition helpers and the batched `NodeSet` status writer
//!
//! # Example
//!
//! ```rust,no_run
//! use nodenet::context::Context;
//! use nodenet::crd::NodeSet;
//! use nodenet::reconcilers::reconcile_nodeset;
//! use std::sync::Arc;
//!
//! async fn reconcile(ctx: Arc<Context>, nodeset: NodeSet) -> anyhow::Result<()> {
//!     let outcome = reconcile_nodeset(ctx, nodeset).await?;
//!     println!("requeue in {:?}", outcome.requeue_after());
//!     Ok(())
//! }
//! ```

pub mod nodeset;
pub mod repository;
pub mod resources;
pub mod status;

pub use nodeset::{reconcile_nodeset, run_pass, ConditionState, NodeSetReconcileOutcome};

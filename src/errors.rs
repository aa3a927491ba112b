// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for a `NodeSet` reconciliation pass.
//!
//! Only true failures of the API server calls are errors. "Not ready yet" and
//! "nothing to do" are values of
//! [`Readiness`](crate::reconcilers::nodeset::readiness::Readiness), so callers
//! never have to inspect error messages to decide whether to requeue.
//!
//! Errors carry the failing call's kind and object key, and keep the
//! underlying client error as their source so it surfaces unmodified.

use thiserror::Error;

/// Boxed source error of a failed API call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while reconciling the network identity of a `NodeSet`.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Listing resources of a kind failed.
    #[error("failed to list {kind} in namespace {namespace}: {source}")]
    List {
        kind: &'static str,
        namespace: String,
        #[source]
        source: BoxError,
    },

    /// Reading a single resource failed (including not found).
    #[error("failed to get {kind} {namespace}/{name}: {source}")]
    Get {
        kind: &'static str,
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },

    /// Creating or patching a resource failed.
    ///
    /// A conflict on the resource version lands here too; see [`NetworkError::is_conflict`].
    #[error("failed to create or patch {kind} {namespace}/{name}: {source}")]
    Persist {
        kind: &'static str,
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },

    /// Writing the status of the reconciled `NodeSet` failed.
    #[error("failed to update status of {kind} {namespace}/{name}: {source}")]
    StatusUpdate {
        kind: &'static str,
        namespace: String,
        name: String,
        #[source]
        source: BoxError,
    },
}

impl NetworkError {
    pub fn list(kind: &'static str, namespace: &str, source: impl Into<BoxError>) -> Self {
        Self::List {
            kind,
            namespace: namespace.to_string(),
            source: source.into(),
        }
    }

    pub fn get(kind: &'static str, namespace: &str, name: &str, source: impl Into<BoxError>) -> Self {
        Self::Get {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: source.into(),
        }
    }

    pub fn persist(
        kind: &'static str,
        namespace: &str,
        name: &str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Persist {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: source.into(),
        }
    }

    pub fn status_update(
        kind: &'static str,
        namespace: &str,
        name: &str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::StatusUpdate {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            source: source.into(),
        }
    }

    /// Short category label, used for metrics and condition messages.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::List { .. } => "list_error",
            Self::Get { .. } => "get_error",
            Self::Persist { .. } => "persist_error",
            Self::StatusUpdate { .. } => "status_error",
        }
    }

    /// Kind of the resource the failing call targeted.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::List { kind, .. }
            | Self::Get { kind, .. }
            | Self::Persist { kind, .. }
            | Self::StatusUpdate { kind, .. } => *kind,
        }
    }

    /// The underlying Kubernetes client error, if the source is one.
    #[must_use]
    pub fn kube_error(&self) -> Option<&kube::Error> {
        let source = match self {
            Self::List { source, .. }
            | Self::Get { source, .. }
            | Self::Persist { source, .. }
            | Self::StatusUpdate { source, .. } => source,
        };
        source.downcast_ref::<kube::Error>()
    }

    /// Check if this error is an optimistic-concurrency conflict (HTTP 409).
    ///
    /// Another writer changed the object between our read and our write. The
    /// next pass re-reads the object and will normally succeed.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self.kube_error(), Some(kube::Error::Api(api_err)) if api_err.code == 409)
    }

    /// Check if a later pass is likely to succeed without user intervention.
    ///
    /// Conflicts (409), rate limiting (429), server errors (5xx) and transport
    /// failures are transient. Errors without a Kubernetes source are treated as
    /// transient as well.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self.kube_error() {
            Some(kube::Error::Api(api_err)) => {
                api_err.code == 409
                    || api_err.code == 429
                    || (api_err.code >= 500 && api_err.code < 600)
            }
            Some(kube::Error::Service(_)) | None => true,
            Some(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;

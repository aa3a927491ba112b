// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared context for the `NodeSet` controller.
//!
//! Every reconciliation receives an `Arc<Context>` holding the Kubernetes
//! client and the repository built on it. The context carries no state about
//! individual `NodeSet`s; each pass re-reads what it needs.

use crate::reconcilers::repository::KubeRepository;
use kube::Client;

/// Shared context passed to the controller.
#[derive(Clone)]
pub struct Context {
    /// Kubernetes client, used for the parent status write
    pub client: Client,

    /// Store access for the child and dependency kinds
    pub repository: KubeRepository,
}

impl Context {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            repository: KubeRepository::new(client.clone()),
            client,
        }
    }
}

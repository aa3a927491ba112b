// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use axum::{http::StatusCode, routing::get, Router};
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, watcher::Config, Controller},
    Api, Client, ResourceExt,
};
use nodenet::{
    constants::{
        ERROR_REQUEUE_DURATION_SECS, KIND_NODE_SET, METRICS_SERVER_BIND_ADDRESS,
        METRICS_SERVER_PATH, TOKIO_WORKER_THREADS,
    },
    context::Context,
    crd::{DNSRecordSet, IPReservation, NodeSet},
    errors::NetworkError,
    metrics,
    reconcilers::reconcile_nodeset,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct ReconcileError(#[from] NetworkError);

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("nodenet-controller")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

fn init_logging() {
    // RUST_LOG selects the filter (default: info), RUST_LOG_FORMAT=json switches
    // to structured output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main() -> Result<()> {
    init_logging();
    info!("Starting nodenet controller");

    let watch_namespace = std::env::var("WATCH_NAMESPACE")
        .ok()
        .filter(|ns| !ns.is_empty());
    let metrics_address = std::env::var("METRICS_BIND_ADDRESS")
        .unwrap_or_else(|_| METRICS_SERVER_BIND_ADDRESS.to_string());

    debug!("Initializing Kubernetes client");
    let client = Client::try_default().await?;
    let ctx = Arc::new(Context::new(client));

    // The controller and the metrics server should never exit; if either
    // does, the process exits with it.
    tokio::select! {
        result = run_nodeset_controller(ctx, watch_namespace) => {
            error!("CRITICAL: NodeSet controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("NodeSet controller exited unexpectedly without error")
        }
        result = run_metrics_server(&metrics_address) => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
    }
}

/// Run the `NodeSet` controller
///
/// Changes to owned `IPReservation`s and `DNSRecordSet`s trigger a pass of
/// their owning `NodeSet`.
async fn run_nodeset_controller(ctx: Arc<Context>, namespace: Option<String>) -> Result<()> {
    let client = ctx.client.clone();
    let (nodesets, reservations, record_sets) = match namespace.as_deref() {
        Some(ns) => {
            info!("Starting NodeSet controller in namespace {}", ns);
            (
                Api::<NodeSet>::namespaced(client.clone(), ns),
                Api::<IPReservation>::namespaced(client.clone(), ns),
                Api::<DNSRecordSet>::namespaced(client, ns),
            )
        }
        None => {
            info!("Starting NodeSet controller in all namespaces");
            (
                Api::<NodeSet>::all(client.clone()),
                Api::<IPReservation>::all(client.clone()),
                Api::<DNSRecordSet>::all(client),
            )
        }
    };

    Controller::new(nodesets, Config::default())
        .owns(reservations, Config::default())
        .owns(record_sets, Config::default())
        .run(reconcile_nodeset_wrapper, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Reconcile wrapper for `NodeSet`
async fn reconcile_nodeset_wrapper(
    nodeset: Arc<NodeSet>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let start = Instant::now();
    debug!(
        nodeset_name = %nodeset.name_any(),
        namespace = ?nodeset.namespace(),
        "Reconcile wrapper called for NodeSet"
    );

    match reconcile_nodeset(ctx, (*nodeset).clone()).await {
        Ok(outcome) => {
            if outcome.is_waiting() {
                metrics::record_reconciliation_requeue(KIND_NODE_SET, start.elapsed());
            } else {
                metrics::record_reconciliation_success(KIND_NODE_SET, start.elapsed());
            }
            info!(
                "Reconciled NodeSet {}: {}",
                nodeset.name_any(),
                outcome.overall.as_str()
            );
            Ok(Action::requeue(outcome.requeue_after()))
        }
        Err(e) => {
            metrics::record_reconciliation_error(KIND_NODE_SET, start.elapsed());
            if e.is_conflict() {
                warn!("Conflict while reconciling NodeSet {}: {}", nodeset.name_any(), e);
            } else {
                error!("Failed to reconcile NodeSet {}: {}", nodeset.name_any(), e);
            }
            Err(e.into())
        }
    }
}

/// Error policy for the `NodeSet` controller
fn error_policy(_nodeset: Arc<NodeSet>, err: &ReconcileError, _ctx: Arc<Context>) -> Action {
    if err.0.is_retryable() {
        Action::requeue(Duration::from_secs(ERROR_REQUEUE_DURATION_SECS))
    } else {
        Action::requeue(Duration::from_secs(ERROR_REQUEUE_DURATION_SECS * 4))
    }
}

async fn metrics_handler() -> (StatusCode, String) {
    match metrics::gather_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Serve the Prometheus registry on `address`
async fn run_metrics_server(address: &str) -> Result<()> {
    let app = Router::new().route(METRICS_SERVER_PATH, get(metrics_handler));
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind metrics server to {address}"))?;

    info!("Serving metrics on {}{}", address, METRICS_SERVER_PATH);
    axum::serve(listener, app).await?;
    Ok(())
}

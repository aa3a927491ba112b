// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD YAML Generator
//!
//! Generates Kubernetes CRD YAML files from the Rust types in src/crd.rs, so
//! the manifests under deploy/crds/ never drift from the code.
//!
//! Usage:
//!   cargo run --bin crdgen -- --output-dir deploy/crds

use anyhow::{Context, Result};
use clap::Parser;
use kube::CustomResourceExt;
use nodenet::crd::{DNSRecordSet, DNSService, IPReservation, NetConfig, NodeSet};
use std::fs;
use std::path::{Path, PathBuf};

const COPYRIGHT_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/crd.rs
# DO NOT EDIT MANUALLY - Run `cargo run --bin crdgen` to regenerate
#
";

/// Write the CRD manifests of every nodenet kind
#[derive(Parser)]
#[command(name = "crdgen", about = "Generate nodenet CRD manifests", long_about = None)]
struct Cli {
    /// Directory the manifests are written to
    #[arg(short, long, default_value = "deploy/crds")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("failed to create {}", cli.output_dir.display()))?;

    println!("Generating CRD YAML files from src/crd.rs...");

    generate_crd::<NodeSet>("nodesets.crd.yaml", &cli.output_dir)?;
    generate_crd::<IPReservation>("ipreservations.crd.yaml", &cli.output_dir)?;
    generate_crd::<NetConfig>("netconfigs.crd.yaml", &cli.output_dir)?;
    generate_crd::<DNSService>("dnsservices.crd.yaml", &cli.output_dir)?;
    generate_crd::<DNSRecordSet>("dnsrecordsets.crd.yaml", &cli.output_dir)?;

    println!(
        "✓ Successfully generated CRD YAML files in {}",
        cli.output_dir.display()
    );
    Ok(())
}

fn generate_crd<T>(filename: &str, output_dir: &Path) -> Result<()>
where
    T: CustomResourceExt,
{
    let yaml = serde_yaml::to_string(&T::crd())?;
    let output_path = output_dir.join(filename);
    fs::write(&output_path, format!("{COPYRIGHT_HEADER}{yaml}"))
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!("  ✓ Generated {filename}");
    Ok(())
}

//! Reviews a single object document against the admission controller.
//!
//! ```text
//! review-object --kind Deployment --operation update --user admin deployment.json
//! ```
//!
//! Prints the decision together with the (possibly labelled) object on
//! standard output and exits with status 1 when the request is denied. Log
//! lines go to standard error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use spec_requirements::config::{self, ACTOR_MARKER_ENV, SpecRequirementsConfig};
use spec_requirements::policy::{AdmissionRequest, SpecRequirements};
use spec_requirements::primitives::{
    GroupVersionKind, Operation, RequestUid, Resource, UserInfo,
};
use spec_requirements::telemetry::{self, LogOutput, TelemetryConfig};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "review-object", about = "Evaluate an object the way the admission controller would")]
struct Cli {
    /// Kind reported by the request; defaults to the document's own kind.
    #[arg(long)]
    kind: Option<String>,

    /// Operation being performed (create, update, delete, connect).
    #[arg(long, default_value = "create")]
    operation: Operation,

    /// Name of the acting user.
    #[arg(long, default_value = "admin")]
    user: String,

    /// Groups of the acting user.
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Request uid to report; a random one is generated when omitted.
    #[arg(long)]
    uid: Option<RequestUid>,

    /// Namespace the object is created in.
    #[arg(long)]
    namespace: Option<String>,

    /// Controller configuration document (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Object document (JSON) with a `kind` field.
    object: PathBuf,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init(&TelemetryConfig {
        ansi: false,
        output: LogOutput::Stderr,
        ..TelemetryConfig::default()
    })?;

    let mut settings = match &cli.config {
        Some(path) => config::load_from_path(path)?,
        None => SpecRequirementsConfig::default(),
    };
    config::apply_env_overrides(&mut settings, |key| std::env::var(key).ok())
        .with_context(|| format!("invalid {ACTOR_MARKER_ENV}"))?;
    let controller = SpecRequirements::from_config(&settings)?;

    let raw = std::fs::read_to_string(&cli.object)
        .with_context(|| format!("failed to read {}", cli.object.display()))?;
    let object: Resource = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", cli.object.display()))?;

    let kind = GroupVersionKind::core(cli.kind.as_deref().unwrap_or(object.kind()));
    let user = cli
        .groups
        .iter()
        .fold(UserInfo::named(&cli.user), |user, group| user.with_group(group));
    let mut request = AdmissionRequest::new(kind, cli.operation, user, object);
    if let Some(uid) = cli.uid {
        request = request.with_uid(uid);
    }
    if let Some(namespace) = cli.namespace {
        request = request.with_namespace(namespace);
    }
    info!(
        uid = %request.uid(),
        kind = %request.kind().kind,
        namespace = request.namespace().unwrap_or_default(),
        "reviewing object"
    );

    let decision = controller.decide(&mut request);
    let report = json!({
        "decision": decision,
        "object": request.object(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if decision.is_deny() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

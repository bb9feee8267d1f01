//! nim-status - record Ready / NotReady / Failed verdicts on NIM resources.
//!
//! This is the command-line entry point that:
//! - Initializes structured logging
//! - Creates the Kubernetes client
//! - Runs a single status transition, or prints the CRD manifests

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use kube::core::DynamicObject;
use kube::{Client, CustomResourceExt};
use tracing::info;

use nim_operator::controller::store::{FIELD_MANAGER, KubeStatusStore, StatusStore};
use nim_operator::crd::{NIMService, NemoGuardrail, ResourceKind, ResourceRef, ResourceState};
use nim_operator::ConditionUpdater;

#[derive(Parser, Debug)]
#[command(name = "nim-status")]
#[command(about = "Record status conditions on NIMService and NemoGuardrail resources", long_about = None)]
struct Cli {
    /// Field manager recorded on status writes
    #[arg(long, env = "NIM_FIELD_MANAGER", default_value = FIELD_MANAGER, global = true)]
    field_manager: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mark a resource Ready
    Ready(TransitionArgs),
    /// Mark a resource NotReady
    NotReady(TransitionArgs),
    /// Mark a resource Failed
    Failed(TransitionArgs),
    /// Print the CRD manifests as a JSON List
    Crds,
}

#[derive(Args, Debug)]
struct TransitionArgs {
    /// Resource kind (NIMService or NemoGuardrail)
    #[arg(long)]
    kind: String,

    /// Resource namespace
    #[arg(long, short = 'n', default_value = "default")]
    namespace: String,

    /// Resource name
    #[arg(long)]
    name: String,

    /// Machine-readable reason
    #[arg(long)]
    reason: String,

    /// Human-readable message
    #[arg(long, default_value = "")]
    message: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so `crds` output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nim_operator=info".parse()?)
                .add_directive("kube=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let (outcome, args) = match cli.command {
        Command::Crds => {
            print_crds()?;
            return Ok(());
        }
        Command::Ready(args) => (ResourceState::Ready, args),
        Command::NotReady(args) => (ResourceState::NotReady, args),
        Command::Failed(args) => (ResourceState::Failed, args),
    };

    // Reject unknown kinds before touching the cluster
    let kind: ResourceKind = args.kind.parse()?;
    let target = ResourceRef::new(kind, args.namespace, args.name);

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let store = Arc::new(KubeStatusStore::with_field_manager(
        client,
        cli.field_manager,
    ));
    let mut resource = load_resource(&*store, &target).await?;
    let updater = ConditionUpdater::new(store);

    match outcome {
        ResourceState::Ready => {
            updater
                .mark_ready(&mut resource, &args.reason, &args.message)
                .await?
        }
        ResourceState::NotReady => {
            updater
                .mark_not_ready(&mut resource, &args.reason, &args.message)
                .await?
        }
        ResourceState::Failed => {
            updater
                .mark_failed(&mut resource, &args.reason, &args.message)
                .await?
        }
    }

    info!(resource = %target, outcome = %outcome, "Transition recorded");
    Ok(())
}

/// Read the object the transition is computed from.
///
/// The updater builds the new status from the caller's copy and writes it
/// over its own fresh read. A handle carrying only kind, namespace and name
/// has no status, so starting from one would drop the existing conditions
/// and every kind-specific status field. This first read supplies them; the
/// updater's read supplies the resource version that guards the write.
async fn load_resource(
    store: &dyn StatusStore,
    target: &ResourceRef,
) -> nim_operator::Result<DynamicObject> {
    store.get(target).await
}

fn print_crds() -> Result<(), serde_json::Error> {
    let list = serde_json::json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": [NIMService::crd(), NemoGuardrail::crd()],
    });
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

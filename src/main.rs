//! OpenAPI code generator for Kubernetes operator projects
//!
//! Main entry point. Resolves the project, runs OpenAPI generation for every
//! API package and scaffolds the project's CRD manifests.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crd_openapi_gen::{
    config::{CliArgs, RunConfig},
    generator::OpenApiGenCommand,
    orchestrator::OpenApiGen,
    project::{ProjectConfig, ProjectRoot},
    scaffold::CrdManifestScaffolder,
};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    init_tracing(args.log_json);

    let run_config = RunConfig::from_args(args)?;
    let root = ProjectRoot::new(&run_config.project_root)?;
    let project = ProjectConfig::new(&root, run_config.repo.clone());

    info!(
        "Generating OpenAPI definitions for {} ({})",
        project.project_name, project.repo
    );

    let generator = OpenApiGenCommand::new(&run_config.generator, &root);
    let codegen = OpenApiGen::new(root, project, generator, CrdManifestScaffolder);

    let result = match &run_config.ignore_groups {
        Some(groups) => codegen.run_with_ignored_groups(groups, run_config.ignore_mode),
        None => codegen.run(),
    };

    match result {
        Ok(summary) => {
            info!(
                "Generated {} API packages, scaffolded {} of {} CRDs",
                summary.api_packages, summary.scaffolded, summary.crds
            );
            Ok(())
        }
        Err(e) => {
            error!("Code-generation failed during {}: {}", e.stage(), e);
            Err(e.into())
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crd_openapi_gen=debug"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

mod args;

use clap::Parser;
use deployment_runner::{print_failure, print_outcome, Orchestrator};
use env_azure::AzureCliClient;

use crate::args::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = deploy_utils::setup_logging(args.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let request = match args.request() {
        Ok(request) => request,
        Err(e) => {
            print_failure(&e);
            std::process::exit(e.exit_code());
        }
    };
    let settings = args.settings();
    let client = AzureCliClient::new(&args.az_path, args.subscription.clone());

    log::info!(
        "Deploying network for environment {} to {} in {}",
        request.environment(),
        request.resource_group_name(),
        request.location()
    );

    let mut orchestrator = Orchestrator::new(&client, &settings);
    let result = orchestrator.run(&request).await;
    if let Some(session) = orchestrator.session() {
        println!(
            "Subscription: {} ({}) as {}",
            session.subscription_name, session.subscription_id, session.user
        );
    }
    match result {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => {
            print_failure(&e);
            std::process::exit(e.exit_code());
        }
    }
}

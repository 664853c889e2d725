use colored::Colorize;
use deploy_defs::{DeploymentError, DeploymentOutcome, VerificationReport};
use prettytable::{row, Table};

pub fn verification_table(report: &VerificationReport) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Resource".purple().bold(),
        "Kind".blue().bold(),
        "Exists".green().bold(),
        "Shape".green().bold(),
    ]);
    for result in &report.results {
        table.add_row(row![
            result.name,
            result.kind,
            yes_no(result.exists),
            yes_no(result.shape_matches),
        ]);
    }
    table
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".red()
    }
}

pub fn print_outcome(outcome: &DeploymentOutcome) {
    match outcome {
        DeploymentOutcome::Validated(report) => {
            println!(
                "{} Template validated as {} ({})",
                "✓".green().bold(),
                report.deployment_name,
                report.provisioning_state.as_deref().unwrap_or("no state reported")
            );
            if !report.validated_resources.is_empty() {
                println!("Resources that would be deployed:");
                for resource in &report.validated_resources {
                    println!("  {}", resource);
                }
            }
            for diagnostic in &report.diagnostics {
                println!("  {}", diagnostic.yellow());
            }
            println!("Validation only, no outputs were written.");
        }
        DeploymentOutcome::Deployed(deployed) => {
            let outputs = &deployed.outputs;
            println!("{} Network deployed", "✓".green().bold());
            println!("  Virtual network:   {} ({})", outputs.vnet_name, outputs.vnet_address_space);
            for subnet in outputs.subnets() {
                println!("  Subnet:            {} ({})", subnet.name, subnet.prefix);
            }
            for nsg in outputs.nsg_names() {
                println!("  Security group:    {}", nsg);
            }
            println!("Outputs stored in {}", deployed.output_file.display());

            match &deployed.verification {
                Some(report) => print_verification(report),
                None => println!("Verification skipped."),
            }
        }
    }
}

fn print_verification(report: &VerificationReport) {
    verification_table(report).printstd();
    if report.is_clean() {
        println!("All resources verified.");
        return;
    }
    println!(
        "{} verification warnings (deployment still succeeded):",
        report.warnings.len()
    );
    for warning in &report.warnings {
        println!("  [{}] {}", warning.category().yellow(), warning);
    }
}

pub fn print_failure(error: &DeploymentError) {
    eprintln!("[{}] {}", error.category().red().bold(), error);
}

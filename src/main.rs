use clap::Parser;
use pdcp_delays::{
    compare_inputs, logging, Cli, DelayError, OutputFormatter, OutputMode, SampleExtraction,
    UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    if cli.compare {
        return handle_compare(&cli);
    }

    let extraction = match SampleExtraction::from_cli(&cli) {
        Ok(extraction) => extraction,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    match extraction.run(&cli.inputs, &cli.run_mode()) {
        Ok(report) => {
            extraction.output_formatter().print_batch_report(&report);
            // Missing or skipped inputs are warnings, not failures.
            0
        }
        Err(e) => {
            tracing::debug!(error = %e, "Extraction failed");
            extraction.handle_error(&e);
            e.exit_code()
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli.config_output_path();

    match SampleExtraction::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  pdcp-delays <logs...> --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_compare(cli: &Cli) -> i32 {
    let formatter = OutputFormatter::new(cli.output_mode(), cli.verbose, cli.quiet);

    match compare_inputs(&cli.inputs, cli.unit) {
        Ok(report) => {
            formatter.print_comparison(&report);
            0
        }
        Err(e) => {
            formatter.print_user_friendly_error(&e);
            e.exit_code()
        }
    }
}

fn print_startup_error(error: &DelayError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

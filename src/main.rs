use clap::Parser;
use latency_cdf_report::cli::Cli;
use latency_cdf_report::run_report;
use latency_cdf_report::ui::console;

fn main() {
    let args = Cli::parse();

    let outcome = args
        .into_config()
        .and_then(|(config, options)| run_report(&config, &options));

    if let Err(e) = outcome {
        console::print_fatal(&e);
        std::process::exit(e.exit_code());
    }
}

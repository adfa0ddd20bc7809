use std::process::ExitCode;

use addsite::Pipeline;
use addsite::logging;
use addsite::pipeline::Cli;
use addsite::provision::DnsPhase;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: {e}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_cli(cli)?;

    let Some(report) = pipeline.run()? else {
        return Ok(());
    };

    eprintln!();
    eprintln!("Site ready: {}", report.webroot.display());
    match &report.dns {
        DnsPhase::Done(dns) if dns.failures() > 0 => eprintln!(
            "DNS zone {} created, {} of {} records failed",
            dns.domain_id,
            dns.failures(),
            dns.records.len()
        ),
        DnsPhase::Done(dns) => eprintln!(
            "DNS zone {} created with {} records",
            dns.domain_id,
            dns.records.len()
        ),
        DnsPhase::Failed(_) | DnsPhase::Skipped(_) => {}
    }

    Ok(())
}

mod logging;
mod report;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::Result;
use tracing::{debug, warn, Level};

use cellstat_platform::{
    compute, AcquisitionError, CounterSource, IoregSource, NativeSource, RawBatteryCounters,
};

/// Battery health & charge reporter
///
/// Performs one fetch-and-report cycle and exits. Missing battery data is
/// a normal outcome (reported, exit code 0), not a failure.
#[derive(Debug, Parser)]
#[command(name = "cellstat", version, verbatim_doc_comment)]
struct Cli {
    /// Counter source (auto tries native first, then ioreg)
    #[arg(short, long, value_enum, default_value = "auto")]
    source: Source,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Native power-management interface, falling back to ioreg
    Auto,
    /// Native power-management interface only
    Native,
    /// ioreg inventory command only
    Ioreg,
}

/// One acquired snapshot plus the labels needed to present it.
struct Acquisition {
    counters: RawBatteryCounters,
    unit: &'static str,
    source: &'static str,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.log_level);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    match acquire(cli.source) {
        Ok(acq) => {
            let metrics = compute(&acq.counters);
            if cli.json {
                println!(
                    "{}",
                    report::render_json(acq.source, acq.unit, &acq.counters, &metrics)
                );
            } else {
                print!("{}", report::render(&acq.counters, &metrics, acq.unit));
            }
        }
        Err(err) => {
            warn!(%err, "battery data acquisition failed");
            if cli.json {
                println!("{}", report::render_unavailable_json());
            } else {
                print!("{}", report::render_unavailable());
            }
        }
    }

    Ok(())
}

fn acquire(source: Source) -> Result<Acquisition, AcquisitionError> {
    match source {
        Source::Native => NativeSource::new().and_then(|mut s| fetch_from(&mut s)),
        Source::Ioreg => fetch_from(&mut IoregSource::new()),
        Source::Auto => match NativeSource::new().and_then(|mut s| fetch_from(&mut s)) {
            Ok(acq) => Ok(acq),
            Err(err) => {
                debug!(%err, "native source unavailable, falling back to ioreg");
                fetch_from(&mut IoregSource::new())
            }
        },
    }
}

fn fetch_from(source: &mut dyn CounterSource) -> Result<Acquisition, AcquisitionError> {
    let counters = source.fetch()?;
    debug!(source = source.name(), "acquired battery counters");
    Ok(Acquisition {
        counters,
        unit: source.unit(),
        source: source.name(),
    })
}

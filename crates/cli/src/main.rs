use clap::Parser;
use scriptos_runtime::{
    create_os_registry, NativeFunctionRegistry, OsLibraryConfig, RuntimeError, Value,
};
use tracing::{info, instrument, warn};

/// Switch into each directory in turn through the `os.chdir` host function.
#[derive(Debug, Parser)]
#[command(name = "scriptos-cli", version)]
struct Cli {
    /// Append the OS error reason to failure messages.
    #[arg(long)]
    detailed_errors: bool,

    /// Directories to switch into, each relative to the previous one.
    #[arg(required = true)]
    paths: Vec<String>,
}

impl Cli {
    fn library_config(&self) -> OsLibraryConfig {
        OsLibraryConfig {
            detailed_errors: self.detailed_errors,
        }
    }
}

/// Printed host return values for one run.
#[derive(Debug, Default, PartialEq, Eq)]
struct RunReport {
    lines: Vec<String>,
    succeeded: bool,
}

fn format_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\t")
}

#[instrument(skip_all, fields(path_count = paths.len()))]
fn run_paths(
    registry: &NativeFunctionRegistry,
    paths: &[String],
) -> Result<RunReport, RuntimeError> {
    let mut report = RunReport::default();
    for path in paths {
        let values = registry.call("os.chdir", vec![Value::from(path.as_str())])?;
        report.lines.push(format_values(&values));
        if matches!(values.first(), Some(Value::Nil)) {
            warn!(path = %path, "directory change failed; stopping");
            return Ok(report);
        }
    }

    let cwd = registry.call("os.getcwd", Vec::new())?;
    report.lines.push(format_values(&cwd));
    report.succeeded = true;
    info!(lines = report.lines.len(), "all directory changes succeeded");
    Ok(report)
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = scriptos_base::logging::init_logging() {
        eprintln!("{error}");
        std::process::exit(1);
    }

    info!(path_count = cli.paths.len(), "running scriptos CLI");
    let registry = create_os_registry(cli.library_config());
    match run_paths(&registry, &cli.paths) {
        Ok(report) => {
            for line in &report.lines {
                println!("{line}");
            }
            if !report.succeeded {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;

use qfs_cli::{
    show_help, write_usage, AdminConfig, Catalog, ConnectionOptions, Dispatcher, ExitStatus,
    Printer,
};
use qfs_logging::init_logging;
use qfs_mon_client::{MonClient, MonExecutor};
use qfs_types::ServerLocation;

const PROGRAM: &str = "qfsadmin";

/// QFS meta server administration tool
///
/// Sends administrative and debugging commands to a meta server and prints
/// their results.
#[derive(Parser, Debug)]
#[command(name = PROGRAM, version, about, disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionOptions,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Print usage and the command list.
    #[arg(short, long, default_value_t = false)]
    help: bool,

    /// Commands to run, in order.
    #[arg(value_name = "CMD")]
    commands: Vec<String>,
}

/// What to do once the command line has been read.
#[derive(Debug)]
enum Startup {
    Exit(ExitStatus),
    Run {
        location: ServerLocation,
        config: AdminConfig,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let catalog = match Catalog::builtin() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}: {}", PROGRAM, e);
            return ExitCode::FAILURE;
        }
    };

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            let _ = write_usage(&mut io::stderr().lock(), PROGRAM, &catalog);
            return ExitCode::FAILURE;
        }
    };

    let mut printer = Printer::stdio();
    let (location, config) = match prepare(&cli, &catalog, &mut printer) {
        Ok(Startup::Run { location, config }) => (location, config),
        Ok(Startup::Exit(status)) => return ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("{}: {:#}", PROGRAM, e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&config.log.clone().with_verbosity(cli.verbose)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}: failed to initialize logging: {}", PROGRAM, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(%location, ?config, "starting");

    let client = MonClient::new(config.client);
    let status = execute(&catalog, &client, &location, &cli.commands, &mut printer).await;
    ExitCode::from(status.code())
}

/// Handle `-h`, check the server location and load the `-f` file.
///
/// Usage goes to stdout for `-h` and to stderr when the server or port is
/// missing. Nothing is sent to the server here.
fn prepare<O: Write, E: Write>(
    cli: &Cli,
    catalog: &Catalog,
    printer: &mut Printer<O, E>,
) -> anyhow::Result<Startup> {
    if cli.help {
        // `-h <cmd>` shows just that command.
        match cli.commands.first() {
            Some(name) => show_help(printer, catalog, Some(name.as_str()))?,
            None => write_usage(printer.out(), PROGRAM, catalog)?,
        }
        printer.flush()?;
        return Ok(Startup::Exit(ExitStatus::Success));
    }

    let Some(location) = cli.connection.location() else {
        write_usage(printer.err(), PROGRAM, catalog)?;
        printer.err().flush()?;
        return Ok(Startup::Exit(ExitStatus::Failure));
    };

    let config = AdminConfig::load_optional(cli.connection.config_path())
        .context("invalid configuration")?;
    Ok(Startup::Run { location, config })
}

/// Run the commands and flush the output.
async fn execute<O: Write, E: Write>(
    catalog: &Catalog,
    executor: &dyn MonExecutor,
    location: &ServerLocation,
    commands: &[String],
    printer: &mut Printer<O, E>,
) -> ExitStatus {
    let status = Dispatcher::new(catalog, executor)
        .run_all(location, commands, printer)
        .await;
    match printer.flush() {
        Ok(()) => status,
        Err(err) => {
            tracing::debug!(error = %err, "failed to flush output");
            ExitStatus::Failure
        }
    }
}

use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use bypass403::feed;
use bypass403::output::{OutputFormat, Reporter};
use bypass403::{Catalogue, RunController, ScanConfig};

fn print_ascii_logo() {
    println!(r#"
     _                                 _  _    ___ _____
    | |__  _   _ _ __   __ _ ___ ___  | || |  / _ \___ /
    | '_ \| | | | '_ \ / _` / __/ __| | || |_| | | ||_ \
    | |_) | |_| | |_) | (_| \__ \__ \ |__   _| |_| |__) |
    |_.__/ \__, | .__/ \__,_|___/___/    |_|  \___/____/
           |___/|_|
                    header & verb tampering for 40x URLs
    "#);
}

fn init_logging(cli: &Cli) {
    // Logs go to stderr; stdout carries only results so it can be piped.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!(
        "bypass403={crate},reqwest=info,hyper=info,rustls=warn",
        crate = crate_level
    );
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .init();
}

/// First Ctrl-C stops new requests; a second one exits immediately.
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        eprintln!("[!] Interrupted, waiting for in-flight requests (Ctrl-C again to quit)");
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    if !cli.silent && !cli.json {
        print_ascii_logo();
    }

    let sources = feed::select_sources(cli.url.as_deref(), cli.file.as_deref(), feed::stdin_is_piped());
    let targets = feed::read_targets(&sources)?;

    let config = ScanConfig::default()
        .with_threads(cli.threads as usize)
        .with_timeout(cli.timeout)
        .with_force(cli.force);
    tracing::info!(targets=targets.len(), threads=config.threads, timeout=config.timeout_secs, force=config.force, "Starting scan");

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let mut controller = RunController::new(&config, Catalogue::builtin(), cancel)?;

    let format = if cli.json {
        OutputFormat::JsonLines
    } else {
        let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
        OutputFormat::Text { color }
    };
    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), format);

    let summary = controller.run(&targets, &mut reporter).await?;

    tracing::info!(
        targets=summary.targets,
        probed=summary.probed,
        skipped=summary.skipped,
        invalid=summary.invalid,
        interesting=summary.interesting,
        transport_errors=summary.transport_errors,
        requests=controller.dispatcher().pool().completed(),
        "Scan complete"
    );
    if summary.cancelled {
        tracing::warn!("scan interrupted before all targets were probed");
    }
    Ok(())
}

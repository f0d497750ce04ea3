use clap::Parser;
use minisiga::domain::ports::Repository;
use minisiga::utils::logger;
use minisiga::{CliConfig, Console, CsvStore};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting minisiga");

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {e}");
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?settings, "effective settings");

    let store = CsvStore::new(&settings.data_dir, settings.delimiter);
    let registry = store.load()?;
    println!(
        "Loaded {} students, {} courses, {} enrollments",
        registry.students().len(),
        registry.courses().len(),
        registry.enrollments().len()
    );

    let mut console = Console::new(registry, store, settings);
    let interrupted = console.interrupt_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        interrupted.store(true, std::sync::atomic::Ordering::SeqCst);
    }) {
        tracing::warn!("could not install interrupt handler: {e}");
    }
    console.run()?;
    Ok(())
}

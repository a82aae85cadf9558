use clap::Parser;
use flight_results::core::session::{Command, Step};
use flight_results::utils::error::ErrorSeverity;
use flight_results::utils::{logger, validation::Validate};
use flight_results::{
    CliConfig, FlightError, JsonFileSource, OutputFormat, ResultsEngine, ResultsPipeline,
    TomlConfig, ViewSettings, ViewState,
};
use std::io::{self, BufRead, Write};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting flight-results");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ flight-results failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn resolve_settings(config: &CliConfig) -> Result<ViewSettings, FlightError> {
    let base = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?.settings()?
        }
        None => ViewSettings::default(),
    };
    let settings = config.apply_to(base)?;
    settings.validate()?;
    tracing::debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

fn run(config: &CliConfig) -> Result<(), FlightError> {
    config.validate()?;
    let settings = resolve_settings(config)?;

    let source = JsonFileSource::new(&config.input);
    let pipeline = ResultsPipeline::from_config(&settings)?;
    let engine = ResultsEngine::new(source, settings.format, pipeline);
    let state = settings.initial_state(config.initial_page());

    if config.interactive {
        return run_interactive(&engine, state);
    }

    let output = engine.run(&state)?;
    print!("{}", output);
    Ok(())
}

fn run_interactive(
    engine: &ResultsEngine<JsonFileSource, OutputFormat>,
    mut state: ViewState,
) -> Result<(), FlightError> {
    let data = engine.load()?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let (mut view, output) = engine.render_state(&data, &state)?;
    write!(stdout, "{}\n{}\n> ", output, Command::help())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.parse::<Command>() {
            Ok(command) => match command.apply(state, &view) {
                Step::Render(next) => {
                    state = next;
                    let (next_view, output) = engine.render_state(&data, &state)?;
                    view = next_view;
                    write!(stdout, "{}", output)?;
                }
                Step::Stay(notice) => writeln!(stdout, "{}", notice)?,
                Step::Quit => break,
            },
            Err(e) => {
                tracing::debug!("Rejected command {:?}: {}", line, e);
                writeln!(stdout, "{}", Command::help())?;
            }
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    tracing::info!("Session ended on page {}", state.page);
    Ok(())
}

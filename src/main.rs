use clap::Parser;
use pharmacy_locator::domain::ports::RenderSink;
use pharmacy_locator::utils::{logger, validation::Validate};
use pharmacy_locator::{CliArgs, DisplaySink, FileSink, NoopSink, PipelineDriver, Result};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    let Some(address) = args.address() else {
        println!("{}", CliArgs::usage());
        return ExitCode::SUCCESS;
    };

    match run(&args, &address).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &CliArgs, address: &str) -> Result<()> {
    args.validate()?;
    let settings = args.load_settings()?;
    settings.warn_missing_keys();
    tracing::debug!("Settings: {:?}", settings);

    let sink: Box<dyn RenderSink> = match (&args.output, args.no_map) {
        (Some(path), _) => Box::new(FileSink::new(path)),
        (None, true) => Box::new(NoopSink),
        (None, false) => Box::new(DisplaySink::new(settings.viewer.clone())),
    };

    let mut driver = PipelineDriver::from_settings(&settings, sink)?;
    let mut stdout = std::io::stdout();
    driver.run(address, &mut stdout).await?;
    Ok(())
}

use clap::Parser;
use reco::cli::Cli;
use reco::output::Logger;
use reco::pipeline;
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            Logger::new(1).fatal(&format!("reading directory from input: {}", e));
            process::exit(1);
        }
    };

    let mut logger = Logger::new(config.verbose);
    if let Err(e) = pipeline::run(&config, &mut logger) {
        logger.fatal(&e.to_string());
        process::exit(1);
    }
    logger.info("finished reco");
}

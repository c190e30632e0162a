use clap::Parser;
use make_update::cli::Cli;
use make_update::output::{self, ConsoleCallbacks};
use make_update::update;
use make_update::vcs::SystemRunner;

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().config();

    let cwd = std::env::current_dir()?;
    output::print_working_dir(&cwd, &config);

    let callbacks = ConsoleCallbacks::new(config.clone());
    let result = update::update(&SystemRunner::default(), &callbacks, &config);
    output::print_summary(&result, &config);

    match result.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}

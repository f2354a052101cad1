//! Stack redeploy - Entry Point
//!
//! Triggers a git redeploy of a Portainer stack with overrides taken from
//! the CI environment. Exit codes: 0 redeployed, 1 invalid `NODE_CHAIN`,
//! 2 rejected by Portainer (body on stdout), 3 any other failure.

use std::env;
use std::io::{self, Write};

use stack_redeploy::app::options::AppOptions;
use stack_redeploy::app::run::{report, run};
use stack_redeploy::config::env::ProcessEnv;
use stack_redeploy::errors::EXIT_FAILURE;
use stack_redeploy::logs::init_logging;
use stack_redeploy::utils::version_info;

fn main() {
    let options = match AppOptions::from_args(env::args().skip(1), &ProcessEnv) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    if options.show_version {
        match serde_json::to_string_pretty(&version_info()) {
            Ok(version) => println!("{version}"),
            Err(e) => eprintln!("{e}"),
        }
        return;
    }

    if let Err(e) = init_logging(&options.log) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    let mut stdout = io::stdout();
    let result = runtime.block_on(run(&options, &ProcessEnv, &mut stdout));
    let code = report(&result, &mut stdout, &mut io::stderr());
    let _ = stdout.flush();
    std::process::exit(code);
}

//=========================================================================
// Retroframe Binary
//
// Usage: retroframe [LOGICAL_CORE_PATH]
//
// The core path is extension-less and resolved next to the executable;
// it defaults to `cores/gambatte_libretro`. Log level follows `RUST_LOG`
// (default `info`).
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::{Builder, Env};
use log::error;
use retroframe::{FrontendBuilder, DEFAULT_CORE};

fn main() -> ExitCode {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let core = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CORE));

    match FrontendBuilder::new().with_core(core).build().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

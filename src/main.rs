use std::process::ExitCode;

mod config;
mod controller;
mod display;
mod error;
mod input;
mod library;
mod playback;
mod playlist;
mod runtime;
mod shutdown;

#[cfg(test)]
mod testing;

fn main() -> ExitCode {
    match runtime::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "pressplay stopped");
            eprintln!("pressplay: {e}");
            ExitCode::FAILURE
        }
    }
}

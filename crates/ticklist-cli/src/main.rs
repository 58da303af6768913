use std::ffi::OsString;

use ticklist_cli::Status;

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    match ticklist_cli::run(args) {
        Ok(Status::Clean) => {}
        Ok(Status::Failed) => std::process::exit(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

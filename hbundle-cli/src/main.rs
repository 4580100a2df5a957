//! Binary entrypoint for hbundle-cli

fn main() {
    if let Err(err) = hbundle_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

//! Binary entrypoint for typw-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = typw_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

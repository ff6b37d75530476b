mod platform;

fn main() {
    if let Err(err) = platform::run_app() {
        eprintln!("previewer: {err:#}");
        std::process::exit(1);
    }
}

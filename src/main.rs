fn main() {
    if let Err(err) = journey_grid::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = restaurant_insights::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

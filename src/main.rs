fn main() {
    jen::cli::run();
}

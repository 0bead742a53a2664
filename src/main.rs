fn main() {
    eduprompt::app::cli::run();
}

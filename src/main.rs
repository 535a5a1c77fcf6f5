fn main() -> Result<(), Box<dyn std::error::Error>> {
    charcard::cli::main()
}

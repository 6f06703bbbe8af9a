fn main() -> miette::Result<()> {
    declmeta::cli::run()
}

//! skinforge command-line binary

fn main() -> anyhow::Result<()> {
    skinforge::cli::run_cli()
}

fn main() -> anyhow::Result<()> {
    tierbench_cli::run()
}

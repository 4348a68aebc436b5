use gormgen_cli::GormgenCli;

fn main() -> anyhow::Result<()> {
    GormgenCli::new().parse_and_run()
}

use crosswind_cli::{execute, init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = init();

    let output = execute(cli.command).await?;
    println!("{output}");

    Ok(())
}

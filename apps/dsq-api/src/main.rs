use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = dsq_api::Args::parse();

	dsq_api::run(args).await
}

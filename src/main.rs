use clap::Parser;

use check_datapipeline::check;
use check_datapipeline::cli::Cli;
use check_datapipeline::cloud_providers::aws::config::resolve_aws_config;
use check_datapipeline::cloud_providers::aws::datapipeline::DataPipelineClient;
use check_datapipeline::logging::setup_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging();

    let config = resolve_aws_config(cli.aws_auth(), cli.aws_region.clone()).await;
    let client = DataPipelineClient::new(&config);

    let result = check::run(&client, &cli.check_params()).await;

    // Exactly one line on stdout; the scheduler reads it alongside the exit code.
    println!("{}", result.message);
    std::process::exit(result.status.exit_code());
}

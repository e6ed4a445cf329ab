use clap::Parser;
use hanlp_client::cli::{CliArgs, CliError};
use hanlp_client::{CallOptions, HanlpClient, HanlpError};

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let args = CliArgs::parse();
    let config = args.client_config()?;

    if args.dry_run {
        let request = args.request(&config);
        let body = serde_json::to_string_pretty(&request).map_err(HanlpError::from)?;
        println!("{body}");
        return Ok(());
    }

    let client = HanlpClient::new(config);
    let body = client.parse_raw(args.text_input(), &CallOptions::new())?;
    println!("{body}");
    Ok(())
}

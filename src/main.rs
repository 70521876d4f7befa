use offcloud_probe::cli::{Cli, Commands};
use offcloud_probe::config::Config;
use offcloud_probe::error::Result;
use offcloud_probe::offcloud::OffcloudClient;
use offcloud_probe::probe::{self, Prober};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();

    let handled_key = if cli.clear_key {
        let config = Config::new()?;
        config.clear_api_key()?;
        tracing::info!("Cleared stored API key");
        true
    } else {
        false
    };

    if let Some(key) = &cli.key {
        if cli.save_key {
            let mut config = Config::new()?;
            config.save_api_key(key)?;
            tracing::info!("Saved API key for future use");
            if cli.command.is_none() {
                return Ok(());
            }
        }
    }

    if handled_key && cli.command.is_none() {
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Probe { request_id }) => {
            let api_key = resolve_key_or_exit(&cli);
            let prober = Prober::new(api_key, cli.base_url.clone())?;
            prober.run(request_id).await;
        }
        Some(Commands::Create { url }) => {
            let api_key = resolve_key_or_exit(&cli);
            let client = OffcloudClient::new(api_key, cli.base_url.clone())?;
            probe::create_test_download(&client, url).await;
        }
        None => {
            tracing::error!("No command specified. Use --help to see available commands.");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Resolves the API key, or prints where to get one and bails out before
/// any network call is made.
fn resolve_key_or_exit(cli: &Cli) -> String {
    match cli.resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            println!("❌ {}", e);
            println!("You can get your API key from: https://offcloud.com/#/account");
            println!("You can get a request ID by first creating a download request (`offcloud-probe create`)");
            std::process::exit(1);
        }
    }
}

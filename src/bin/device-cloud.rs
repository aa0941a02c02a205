use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use device_cloud_sdk::config::loader::file_to_config;
use device_cloud_sdk::pro_api::pagination::PageOptions;
use device_cloud_sdk::utils::logging::{self, LogLevel};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "device-cloud.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current access token and its expiry
    Token,
    /// List computer inventory records
    Computers {
        /// inventory sections, e.g. GENERAL HARDWARE or ALL
        #[arg(long, num_args = 1..)]
        sections: Vec<String>,
        #[arg(long, default_value_t = 100)]
        page_size: u32,
    },
    /// List packages
    Packages {
        #[arg(long, default_value_t = 100)]
        page_size: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let client_config = file_to_config(Path::new(&args.config))?;
    logging::init_logging(&logging::resolve(client_config.logging.as_ref(), args.log_level));

    // -------------------------------
    // 2. Build client
    // -------------------------------

    let client = client_config.build_client()?;
    info!(server = %client.base_server_url(), "client ready");

    // -------------------------------
    // 3. Run command
    // -------------------------------

    match args.command {
        Command::Token => {
            let token = client.get_access_token().await?;
            println!("{}\t{}", token, token.expires.to_rfc3339());
        }
        Command::Computers { sections, page_size } => {
            let sections: Vec<&str> = sections.iter().map(String::as_str).collect();
            let options = PageOptions { page_size, ..PageOptions::default() };
            let computers = client.pro_api().get_computer_inventory_v1(&sections, options)?.collect().await?;
            for computer in computers {
                let name = computer.general.as_ref().and_then(|g| g.name.as_deref()).unwrap_or("-");
                println!("{}\t{}", computer.id.as_deref().unwrap_or("-"), name);
            }
        }
        Command::Packages { page_size } => {
            let options = PageOptions { page_size, ..PageOptions::default() };
            let packages = client.pro_api().get_packages_v1(options)?.collect().await?;
            for package in packages {
                println!("{}\t{}\t{}", package.id.as_deref().unwrap_or("-"), package.package_name, package.file_name);
            }
        }
    }

    Ok(())
}

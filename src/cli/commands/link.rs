use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::services::repo_link;

#[derive(Subcommand)]
pub enum LinkCommands {
    #[command(about = "Show the archive URL a repository link downloads from")]
    Resolve {
        #[arg(help = "GitHub repository link (https or SSH form) or any direct URL")]
        link: String,
    },
}

pub async fn handle(cmd: LinkCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        LinkCommands::Resolve { link } => {
            let link = link.trim();
            let resolved = if repo_link::is_github_link(link) {
                repo_link::resolve(link)?
            } else {
                link.to_string()
            };
            output_value(
                &output_format,
                &resolved,
                json!({ "link": link, "archive_url": resolved }),
            )
        }
    }
}

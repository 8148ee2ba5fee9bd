use std::collections::HashMap;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_value;
use crate::cli::OutputFormat;
use crate::notify::messages::default_template;
use crate::services::template::{self, TemplateKey};

#[derive(Subcommand)]
pub enum TemplateCommands {
    #[command(about = "Render a template with sample variables")]
    Preview {
        #[arg(long, help = "Built-in template key to start from (admin_notification, requester_confirmation, project_approved)")]
        key: Option<String>,
        #[arg(long, help = "Subject line (overrides the built-in)")]
        subject: Option<String>,
        #[arg(long, help = "HTML body (overrides the built-in)")]
        body: Option<String>,
        #[arg(long = "var", value_parser = parse_var, help = "Variable as name=value; repeatable")]
        vars: Vec<(String, String)>,
    },

    #[command(about = "List template keys and their variables")]
    Keys,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

pub async fn handle(cmd: TemplateCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TemplateCommands::Preview { key, subject, body, vars } => {
            let base = match key {
                Some(key) => {
                    let key: TemplateKey = key.parse().map_err(anyhow::Error::msg)?;
                    Some(default_template(key))
                }
                None => None,
            };

            let subject = subject
                .or_else(|| base.as_ref().map(|t| t.subject.to_string()))
                .unwrap_or_default();
            let body = match body.or_else(|| base.as_ref().map(|t| t.html.to_string())) {
                Some(body) => body,
                None => anyhow::bail!("Provide --key or --body"),
            };

            let vars: HashMap<String, String> = vars.into_iter().collect();
            let (html, subject) = template::render(&body, &subject, &vars);
            output_value(
                &output_format,
                &format!("Subject: {}\n\n{}", subject, html),
                json!({ "subject": subject, "html": html }),
            )
        }
        TemplateCommands::Keys => {
            let keys: Vec<_> = TemplateKey::ALL
                .into_iter()
                .map(|k| json!({ "key": k.as_str(), "name": k.display_name(), "variables": k.variables() }))
                .collect();
            let text = TemplateKey::ALL
                .into_iter()
                .map(|k| format!("{:<24} {}", k.as_str(), k.variables().join(", ")))
                .collect::<Vec<_>>()
                .join("\n");
            output_value(&output_format, &text, json!({ "templates": keys }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        assert_eq!(
            parse_var("project_title=Smart Parking").unwrap(),
            ("project_title".to_string(), "Smart Parking".to_string())
        );
        assert_eq!(parse_var("empty=").unwrap().1, "");
        assert!(parse_var("novalue").is_err());
        assert!(parse_var("=x").is_err());
    }
}

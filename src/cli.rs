use clap::{Parser, Subcommand};

use crate::adapters::outbound::console::RenderFormat;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'text' or 'json'",
                s
            )),
        }
    }
}

impl OutputFormat {
    pub fn render_format(&self) -> RenderFormat {
        match self {
            OutputFormat::Text => RenderFormat::Text,
            OutputFormat::Json => RenderFormat::Json,
        }
    }
}

/// AI-assisted security operations triage for the terminal
#[derive(Parser, Debug)]
#[command(name = "cyberguard")]
#[command(version = "0.1.0")]
#[command(about = "AI-assisted security operations triage", long_about = None)]
pub struct Args {
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a config file (defaults to ./cyberguard.config.yml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recent security alerts, most recent first
    Alerts,
    /// List tracked vulnerabilities, most recently published first
    Vulns,
    /// Show dashboard metric cards and the threat feed
    Metrics,
    /// Run AI analysis for a single record and print the result
    Analyze {
        #[command(subcommand)]
        target: AnalyzeTarget,
    },
    /// Interactive triage shell
    Triage,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzeTarget {
    /// Analyze the alert with the given id
    Alert {
        /// Alert id as shown in the alerts listing
        id: String,
    },
    /// Analyze the vulnerability with the given id
    Vuln {
        /// Vulnerability id as shown in the vulns listing
        id: String,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

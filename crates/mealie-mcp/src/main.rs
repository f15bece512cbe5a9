//! Mealie MCP Server — entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use mealie_client::MealieClient;
use mealie_mcp::config::{self, Profile};
use mealie_mcp::protocol::ProtocolHandler;
use mealie_mcp::tools::ToolRegistry;
use mealie_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "mealie-mcp",
    about = "MCP server for Mealie — recipe management tools for AI agents",
    version
)]
struct Cli {
    /// Mealie instance URL (defaults to MEALIE_URL).
    #[arg(long)]
    url: Option<String>,

    /// API token (defaults to MEALIE_API_TOKEN).
    #[arg(long)]
    token: Option<String>,

    /// Tool profile (defaults to MEALIE_MCP_PROFILE, then full).
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server over stdio (default).
    Serve {
        /// Mealie instance URL (defaults to MEALIE_URL).
        #[arg(long)]
        url: Option<String>,

        /// API token (defaults to MEALIE_API_TOKEN).
        #[arg(long)]
        token: Option<String>,

        /// Tool profile (defaults to MEALIE_MCP_PROFILE, then full).
        #[arg(long, value_enum)]
        profile: Option<Profile>,
    },

    /// Print server capabilities and the exposed tools as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   mealie-mcp completions bash > ~/.local/share/bash-completion/completions/mealie-mcp
    ///   mealie-mcp completions zsh > ~/.zfunc/_mealie-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch the interactive REPL against the configured instance.
    Repl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    // Stdout carries JSON-RPC frames; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve {
        url: None,
        token: None,
        profile: None,
    }) {
        Commands::Serve {
            url,
            token,
            profile,
        } => {
            let base_url = config::resolve_base_url(url.or(cli.url).as_deref());
            let token = config::resolve_token(token.or(cli.token).as_deref());
            let profile = config::resolve_profile(profile.or(cli.profile));

            let client = MealieClient::new(&base_url, &token)?;
            tracing::info!("Mealie MCP server");
            tracing::info!("Upstream: {base_url}");
            tracing::info!("Profile:  {}", profile.as_str());

            let registry = ToolRegistry::new(Arc::new(client), profile);
            let handler = ProtocolHandler::new(registry);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let profile = config::resolve_profile(cli.profile);
            let capabilities = mealie_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::definitions(profile);
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "profile": profile.as_str(),
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "mealie-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            let base_url = config::resolve_base_url(cli.url.as_deref());
            let token = config::resolve_token(cli.token.as_deref());
            let profile = config::resolve_profile(cli.profile);
            let client = MealieClient::new(&base_url, &token)?;
            mealie_mcp::repl::run(Arc::new(client), profile).await?;
        }
    }

    Ok(())
}

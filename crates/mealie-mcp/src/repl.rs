//! Interactive REPL for exercising tools against a live Mealie instance.
//!
//! Launch with `mealie-mcp repl`. Type `/help` for available commands,
//! Tab for completion.

use std::sync::Arc;

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use mealie_client::MealieClient;

use crate::config::Profile;
use crate::tools::registry::TOOLS;
use crate::tools::ToolRegistry;
use crate::types::{InitializeResult, ToolContent};

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/info", "Show server capabilities and tool count"),
    ("/tools", "List tools exposed by the active profile"),
    ("/call", "Call a tool: /call <name> [json-args]"),
    ("/profile", "Show or switch the profile: /profile [core|full]"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion of commands and tool names.
struct MealieHelper;

impl Completer for MealieHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<12} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // Tool-name completion for /call.
        let mut parts = input.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("");
        let args = parts.next().unwrap_or("");
        if cmd == "/call" && !args.contains(' ') {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = TOOLS
                .iter()
                .filter(|spec| spec.name.starts_with(args))
                .map(|spec| Pair {
                    display: spec.name.to_string(),
                    replacement: format!("{} ", spec.name),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for MealieHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for MealieHelper {}
impl Validator for MealieHelper {}
impl Helper for MealieHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Run the interactive REPL.
pub async fn run(client: Arc<MealieClient>, profile: Profile) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1mmealie-mcp v{}\x1b[0m \x1b[90m\u{2014} Recipe Tools for AI Agents\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!("    Upstream: {}", client.base_url());
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<MealieHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(MealieHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".mealie_mcp_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut registry = ToolRegistry::new(client.clone(), profile);
    let prompt = " \x1b[36mmealie>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input = line.strip_prefix('/').unwrap_or(line);
                if input.is_empty() {
                    cmd_help();
                    continue;
                }

                let mut parts = input.splitn(2, ' ');
                let cmd = parts.next().unwrap_or("");
                let args = parts.next().unwrap_or("").trim();

                match cmd {
                    "exit" | "quit" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    "help" | "h" | "?" => cmd_help(),
                    "clear" | "cls" => eprint!("\x1b[2J\x1b[H"),
                    "info" => cmd_info(&registry),
                    "tools" => cmd_tools(&registry),
                    "profile" => {
                        if args.is_empty() {
                            eprintln!("  Profile: {}", registry.profile().as_str());
                        } else {
                            let profile = Profile::parse_lenient(args);
                            registry = ToolRegistry::new(client.clone(), profile);
                            eprintln!("  Switched to profile: {}", profile.as_str());
                        }
                    }
                    "call" => cmd_call(&registry, args).await,
                    _ => {
                        eprintln!("  Unknown command '/{cmd}'. Type /help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<12} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: Tab completion works for commands and tool names.");
    eprintln!();
}

fn cmd_info(registry: &ToolRegistry) {
    let capabilities = InitializeResult::default_result();
    let tools = registry.list_tools();
    eprintln!();
    eprintln!(
        "  Server:   {} v{}",
        capabilities.server_info.name, capabilities.server_info.version
    );
    eprintln!("  Protocol: {}", capabilities.protocol_version);
    eprintln!("  Profile:  {}", registry.profile().as_str());
    eprintln!("  Tools:    {}", tools.len());
    eprintln!();
}

fn cmd_tools(registry: &ToolRegistry) {
    let tools = registry.list_tools();
    eprintln!();
    eprintln!("  {} MCP tools available:", tools.len());
    eprintln!();
    for tool in &tools {
        eprintln!(
            "    {:<34} {}",
            tool.name,
            tool.description.as_deref().unwrap_or("")
        );
    }
    eprintln!();
}

async fn cmd_call(registry: &ToolRegistry, args: &str) {
    if args.is_empty() {
        eprintln!("  Usage: /call <tool> [json-args]");
        return;
    }

    let mut parts = args.splitn(2, ' ');
    let name = parts.next().unwrap_or("");
    let raw_args = parts.next().unwrap_or("").trim();

    let arguments = if raw_args.is_empty() {
        None
    } else {
        match serde_json::from_str(raw_args) {
            Ok(value) => Some(value),
            Err(e) => {
                eprintln!("  Invalid JSON arguments: {e}");
                return;
            }
        }
    };

    match registry.call(name, arguments).await {
        Ok(result) => {
            for content in &result.content {
                let ToolContent::Text { text } = content;
                eprintln!("{text}");
            }
        }
        Err(e) => {
            eprintln!("  Tool call failed: {e}");
        }
    }
}

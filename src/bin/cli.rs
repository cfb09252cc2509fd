use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{anyhow, Result, Context};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use rustyline::history::DefaultHistory;

use schemabot::assistant::canned::{GREETING, QUICK_OPTIONS};
use schemabot::assistant::{Assistant, ChatSession, HttpGenerator, DEFAULT_API_BASE, DEFAULT_MODEL};
use schemabot::config::AssistantConfig;
use schemabot::history::ConversationRecord;
use schemabot::schema::{SplitMode, TableDescriptor};

const HISTORY_FILE: &str = ".schemabot_history";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(author, version, about = "Schemabot - a chat assistant that reads SQL schemas")]
struct Cli {
    /// Conversation log file
    #[arg(long, default_value = "schemabot_conversations.bin")]
    history_file: PathBuf,

    /// Split column definitions only on commas outside parentheses
    #[arg(long)]
    depth_aware: bool,

    /// Language answers are requested in
    #[arg(long, default_value = "Spanish")]
    language: String,

    /// Model used by the generative API
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generative API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tables found in a SQL file
    Tables {
        /// SQL file to read
        file: PathBuf,

        /// Print JSON instead of a table listing
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent for a question
    Prompt {
        /// Question to ask
        question: String,

        /// SQL file used as context
        #[arg(long)]
        sql: Option<PathBuf>,
    },

    /// Ask a single question
    Ask {
        /// Question to ask
        question: String,

        /// SQL file used as context
        #[arg(long)]
        sql: Option<PathBuf>,
    },

    /// List recent exchanges
    History {
        /// Number of exchanges to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Start an interactive chat
    Shell {
        /// SQL file used as context
        #[arg(long)]
        sql: Option<PathBuf>,
    },
}

impl Cli {
    fn assistant_config(&self) -> AssistantConfig {
        let split_mode = if self.depth_aware {
            SplitMode::DepthAware
        } else {
            SplitMode::Naive
        };

        AssistantConfig {
            language: self.language.clone(),
            ..AssistantConfig::default()
        }
        .with_split_mode(split_mode)
        .with_history_path(&self.history_file)
    }

    /// Assistant for commands that answer questions: history file opened,
    /// generator attached when an API key resolves
    fn chat_assistant(&self) -> Result<Assistant> {
        let config = self.assistant_config();
        let has_key = config.credentials.api_key().is_some();
        let assistant = Assistant::open(config).context("Failed to open conversation history")?;

        if !has_key {
            info!("No API key configured, answering with canned replies");
            return Ok(assistant);
        }

        let generator = HttpGenerator::new(&self.api_base, &self.model, REQUEST_TIMEOUT)?;
        info!("Using model {} at {}", self.model, generator.endpoint());
        Ok(assistant.with_generator(Box::new(generator)))
    }
}

fn init_logging(level: &str) -> Result<()> {
    let level: LevelFilter = level
        .parse()
        .map_err(|_| anyhow!("Unknown log level: {}", level))?;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}

fn read_sql(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read SQL file {}", path.display()))
}

fn session_with_sql(assistant: &Assistant, sql: Option<&Path>) -> Result<ChatSession> {
    let mut session = ChatSession::new();
    if let Some(path) = sql {
        let content = read_sql(path)?;
        assistant.load_sql(&mut session, content);
    }
    Ok(session)
}

fn run_shell(assistant: &Assistant, mut session: ChatSession) -> Result<()> {
    println!("{}", GREETING);
    println!("Try: {}", QUICK_OPTIONS.join(" | "));
    println!("Type 'help' for assistance or 'exit' to quit.");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        let readline = rl.readline("schemabot> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);

                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let (command, argument) = match line.split_once(char::is_whitespace) {
                    Some((command, rest)) => (command, rest.trim()),
                    None => (line, ""),
                };

                match command.to_lowercase().as_str() {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    }
                    "help" => {
                        print_help();
                    }
                    "load" if !argument.is_empty() => {
                        match read_sql(Path::new(argument)) {
                            Ok(content) => {
                                let extraction = assistant.load_sql(&mut session, content);
                                println!("Loaded {} tables.", extraction.tables.len());
                            }
                            Err(err) => println!("Error: {:#}", err),
                        }
                    }
                    "tables" => {
                        if session.has_schema() {
                            display_tables(session.tables());
                        } else {
                            println!("No SQL loaded. Use 'load <file>' first.");
                        }
                    }
                    "reset" => {
                        session.reset();
                        println!("Conversation reset.");
                    }
                    "history" => {
                        if let Some(history) = assistant.history() {
                            display_history(&history.recent(assistant.config().history_limit));
                        }
                    }
                    _ => {
                        // Anything else is a question
                        match assistant.reply(&session, line) {
                            Ok(reply) => println!("{}", reply.text),
                            Err(err) => println!("Error: {}", err),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Available commands:");
    println!("  load <file>                   - Load a SQL file as context");
    println!("  tables                        - Show the tables of the loaded SQL");
    println!("  reset                         - Forget the loaded SQL");
    println!("  history                       - Show recent exchanges");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
    println!();
    println!("Anything else is sent to the assistant as a question.");
}

fn display_tables(tables: &[TableDescriptor]) {
    if tables.is_empty() {
        println!("No CREATE TABLE statements found.");
        return;
    }

    let headers = ["column", "type", "constraints"];

    for table in tables {
        let rows: Vec<[String; 3]> = table
            .columns()
            .iter()
            .map(|c| [c.name().to_string(), c.data_type().to_string(), c.constraints().join(" ")])
            .collect();

        let widths = column_widths(&headers, &rows);

        println!("{}", table.name());

        print!("|");
        for (i, header) in headers.iter().enumerate() {
            print!(" {:<width$} |", header, width = widths[i]);
        }
        println!();

        print!("+");
        for &width in &widths {
            print!("{:-<width$}+", "", width = width + 2);
        }
        println!();

        for row in &rows {
            print!("|");
            for (i, value) in row.iter().enumerate() {
                print!(" {:<width$} |", value, width = widths[i]);
            }
            println!();
        }

        println!("({} columns)", rows.len());
        println!();
    }
}

/// Display width of each column, counted in characters
fn column_widths(headers: &[&str; 3], rows: &[[String; 3]]) -> [usize; 3] {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }
    widths
}

fn display_history(records: &[ConversationRecord]) {
    if records.is_empty() {
        println!("No conversations yet.");
        return;
    }

    for record in records {
        let time = record
            .time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        println!("[{}] Q: {}", time, record.question);
        println!("A: {}", record.answer);
        println!();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level).context("Failed to initialize logging")?;

    // Only commands that read or write conversations touch the history file
    match &cli.command {
        Some(Commands::Tables { file, json }) => {
            let assistant = Assistant::new(cli.assistant_config());
            let content = read_sql(file)?;
            let extraction = assistant.extractor().extract(&content);
            if *json {
                println!("{}", serde_json::to_string_pretty(&extraction.tables)?);
            } else {
                display_tables(&extraction.tables);
            }
        }
        Some(Commands::Prompt { question, sql }) => {
            let assistant = Assistant::new(cli.assistant_config());
            let session = session_with_sql(&assistant, sql.as_deref())?;
            println!("{}", assistant.build_prompt(&session, question));
        }
        Some(Commands::Ask { question, sql }) => {
            let assistant = cli.chat_assistant()?;
            let session = session_with_sql(&assistant, sql.as_deref())?;
            let reply = assistant.reply(&session, question)?;
            println!("{}", reply.text);
        }
        Some(Commands::History { limit }) => {
            let assistant = Assistant::open(cli.assistant_config())
                .context("Failed to open conversation history")?;
            if let Some(history) = assistant.history() {
                display_history(&history.recent(*limit));
            }
        }
        Some(Commands::Shell { sql }) => {
            let assistant = cli.chat_assistant()?;
            let session = session_with_sql(&assistant, sql.as_deref())?;
            run_shell(&assistant, session)?;
        }
        None => {
            // Default to shell if no command is specified
            run_shell(&cli.chat_assistant()?, ChatSession::new())?;
        }
    }

    Ok(())
}

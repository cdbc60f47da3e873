use clap::{Args, CommandFactory, Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "dotnote",
    bin_name = "dotnote",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Hierarchical notes addressed by dotted names", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Notes,
    Manage,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Notes => "Note Commands:",
            CommandGroup::Manage => "Managing Notes:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "find" | "create" | "open" | "search" | "path" => Some(CommandGroup::Notes),
            "delete" | "rename" => Some(CommandGroup::Manage),
            "types" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Notes, CommandGroup::Manage, CommandGroup::Misc]
    }
}

/// Returns the custom grouped help output as a string
pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("dotnote {version}\n"));
    output.push_str("Hierarchical notes addressed by dotted names\n");
    output.push('\n');
    output.push_str("Usage: dotnote [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Notes are referenced by dotted name (work.standup.md) or by\n");
    output.push_str("their number in the last listing (/3).\n");
    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -v, --verbose    Verbose output\n");
    output.push_str("  -h, --help       Print help\n");
    output.push_str("  -V, --version    Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a command by name, falling back to the grouped help.
pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            let help = subcmd.render_help();
            print!("{}", help);
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Prints help for the parsed subcommand, or the grouped help without one.
pub fn print_subcommand_help(command: &Option<Commands>) {
    match command {
        Some(command) => print_help_for_command(command.name()),
        None => print_grouped_help(),
    }
}

/// Resolution options shared by every command that picks one note.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Restrict to one note type (name or alias, see `dotnote types`)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub note_type: Option<String>,

    /// Sort matches by name, path, size, created, accessed or modified
    #[arg(short, long, value_name = "KEY")]
    pub sort_by: Option<String>,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Name, path fragment or glob (`*` matches within a word); empty opens the finder
    pub pattern: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Flip the sort direction
    #[arg(short, long)]
    pub reverse: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Dotted note name, e.g. work.standup.md
    pub name: String,

    /// Note type, when the name has no extension
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub note_type: Option<String>,

    /// Create the file without opening the editor
    #[arg(long)]
    pub no_editor: bool,
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Note name, pattern, or /N from the last listing
    pub target: String,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Current note name or /N from the last listing
    pub current: String,

    /// New dotted name; keeps the current extension when none is given
    pub new_name: String,

    /// Note type applied to names without an extension
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub note_type: Option<String>,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for; empty browses every note
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration key (root, editor, finder, searcher, previewer, default_type)
    pub key: Option<String>,

    /// Value to set (if omitted, prints current value)
    pub value: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find notes and list them by number
    #[command(alias = "f", display_order = 1)]
    Find(FindArgs),

    /// Create a note and open it
    #[command(alias = "n", display_order = 2)]
    Create(CreateArgs),

    /// Open a note in the editor
    #[command(alias = "o", display_order = 3)]
    Open(TargetArgs),

    /// Search note contents
    #[command(alias = "s", display_order = 4)]
    Search(SearchArgs),

    /// Print the file path of a note
    #[command(display_order = 5)]
    Path(TargetArgs),

    /// Delete a note
    #[command(alias = "rm", display_order = 10)]
    Delete(DeleteArgs),

    /// Rename or move a note
    #[command(alias = "mv", display_order = 11)]
    Rename(RenameArgs),

    /// List the known note types
    #[command(display_order = 20)]
    Types,

    /// Get or set configuration
    #[command(display_order = 21)]
    Config(ConfigArgs),

    /// Print help for dotnote or a subcommand
    #[command(display_order = 22)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Find(_) => "find",
            Commands::Create(_) => "create",
            Commands::Open(_) => "open",
            Commands::Search(_) => "search",
            Commands::Path(_) => "path",
            Commands::Delete(_) => "delete",
            Commands::Rename(_) => "rename",
            Commands::Types => "types",
            Commands::Config(_) => "config",
            Commands::Help { .. } => "help",
        }
    }
}

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use overlay_core::{Action, ZOrderMode};

#[derive(Parser)]
#[command(
    name = "overlay-player",
    version,
    about = "A borderless media overlay that floats above (or below) your desktop"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default settings file
    Init {
        /// Overwrite an existing settings file with the defaults
        #[arg(long)]
        force: bool,
    },
    /// Start the overlay daemon
    Start,
    /// Stop the overlay daemon
    Stop,
    /// Show whether the overlay is running and what it displays
    Status,
    /// Send an action to the running overlay
    Action {
        #[command(subcommand)]
        action: ActionCommands,
    },
    /// Start the overlay automatically on logon
    Autostart {
        #[command(subcommand)]
        command: AutostartCommands,
    },
    /// Run the daemon (internal — not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Subcommand)]
enum ActionCommands {
    /// Show the overlay if hidden, hide it if shown
    ToggleVisibility,
    /// Display another image, GIF, or video
    ChangeMedia {
        /// Media file to display
        path: PathBuf,
    },
    /// Rotate the media 90° clockwise
    Rotate,
    /// Open settings.toml in an editor
    Settings,
    /// Switch between click-through and draggable
    Interactive,
    /// Change how the overlay stacks against other windows
    ZOrder {
        #[arg(value_enum)]
        mode: ZOrderArg,
    },
    /// Close the overlay
    Exit,
}

#[derive(Subcommand)]
enum AutostartCommands {
    /// Register the overlay to start on logon
    Enable,
    /// Remove the logon entry
    Disable,
    /// Show whether autostart is enabled
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum ZOrderArg {
    Normal,
    AlwaysOnTop,
    Wallpaper,
}

impl From<ZOrderArg> for ZOrderMode {
    fn from(arg: ZOrderArg) -> Self {
        match arg {
            ZOrderArg::Normal => ZOrderMode::Normal,
            ZOrderArg::AlwaysOnTop => ZOrderMode::AlwaysOnTop,
            ZOrderArg::Wallpaper => ZOrderMode::Wallpaper,
        }
    }
}

fn action(command: ActionCommands) -> Action {
    match command {
        ActionCommands::ToggleVisibility => Action::ToggleVisibility,
        // The daemon runs with another working directory.
        ActionCommands::ChangeMedia { path } => Action::ChangeMedia {
            path: std::path::absolute(&path).unwrap_or(path),
        },
        ActionCommands::Rotate => Action::Rotate90,
        ActionCommands::Settings => Action::OpenSettings,
        ActionCommands::Interactive => Action::ToggleInteractive,
        ActionCommands::ZOrder { mode } => Action::SetZOrder { mode: mode.into() },
        ActionCommands::Exit => Action::Exit,
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => commands::init::execute(force),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Action { action: command } => commands::action::execute(action(command)),
        Commands::Autostart { command } => match command {
            AutostartCommands::Enable => commands::autostart::enable(),
            AutostartCommands::Disable => commands::autostart::disable(),
            AutostartCommands::Status => commands::autostart::status(),
        },
    }
}

use crate::types::{ExportFormat, LogLevel, OutputFormat, SortArg, ViewArg};
use clap::{Args, Parser, Subcommand};
use rollcall_types::{AttendanceDate, AttendanceStatus, PermissionScope};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Keyboard-first class attendance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (default: $ROLLCALL_PATH, then the XDG data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive attendance screen
    Attendance {
        #[command(flatten)]
        sheet: SheetArgs,

        #[arg(long)]
        view: Option<ViewArg>,
    },

    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },

    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },

    Roles {
        #[command(subcommand)]
        command: RolesCommand,
    },

    Students {
        #[command(subcommand)]
        command: StudentsCommand,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Seed a sample class to try the attendance screen with
    Demo {
        #[arg(long, default_value = "demo")]
        class: String,
    },
}

/// Which class and day
#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    /// Class id (default: [school] default_class)
    #[arg(long)]
    pub class: Option<String>,

    /// YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<AttendanceDate>,
}

#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Only entries with this status (present|absent|leave or p|a|l)
    #[arg(long)]
    pub status: Option<AttendanceStatus>,

    /// Case-insensitive name match, or an exact roll number
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value = "roll")]
    pub sort: SortArg,

    #[arg(long)]
    pub desc: bool,
}

#[derive(Subcommand)]
pub enum RosterCommand {
    Show {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Set every student of the day to one status and save
    MarkAll {
        #[command(flatten)]
        sheet: SheetArgs,

        #[arg(long)]
        status: AttendanceStatus,
    },

    Export {
        #[command(flatten)]
        sheet: SheetArgs,

        #[command(flatten)]
        view: ViewArgs,

        #[arg(long = "as", default_value = "csv")]
        export_format: ExportFormat,

        /// Directory to write into (default: [export] directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
}

#[derive(Subcommand)]
pub enum AuditCommand {
    List {
        #[arg(long)]
        actor: Option<String>,

        /// Action prefix, e.g. "attendance." or "role.grant"
        #[arg(long)]
        action: Option<String>,

        /// Substring over action, resource and details
        #[arg(long)]
        search: Option<String>,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        since: Option<AttendanceDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        until: Option<AttendanceDate>,

        #[arg(long, default_value = "50")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum RolesCommand {
    List,

    /// Print the permission matrix of a role
    Show { role: String },

    Create {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, default_value = "")]
        description: String,
    },

    Delete { role: String },

    /// Grant `module:action`, a whole module, `*:action`, or `*`
    Grant {
        role: String,
        scope: PermissionScope,
    },

    Revoke {
        role: String,
        scope: PermissionScope,
    },

    /// Clear the scope if fully granted, otherwise grant all of it
    Toggle {
        role: String,
        scope: PermissionScope,
    },
}

#[derive(Subcommand)]
pub enum StudentsCommand {
    List {
        #[arg(long)]
        class: Option<String>,
    },

    /// Register a student (runs every registration step's validation)
    Add {
        #[arg(long)]
        class: Option<String>,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: Option<AttendanceDate>,

        #[arg(long)]
        guardian_name: String,

        #[arg(long)]
        guardian_phone: String,

        #[arg(long)]
        guardian_email: Option<String>,

        /// Default: next free roll number in the class
        #[arg(long)]
        roll: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,

    /// Write config.toml with defaults
    Init {
        #[arg(long)]
        force: bool,

        #[arg(long)]
        school: Option<String>,

        #[arg(long)]
        default_class: Option<String>,
    },
}

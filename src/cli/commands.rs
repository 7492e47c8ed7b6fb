use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agenda", about = concat!("agenda v", env!("CARGO_PKG_VERSION"), " - timed meeting agendas, reordered by drag"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// State file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<String>,

    /// Config file (default: <config_dir>/agenda/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the items of a project (default: current project)
    List(ListArgs),
    /// List all projects
    Projects,
    /// Add an item to the bottom of a project's agenda
    Add(AddArgs),
    /// Delete an item
    Rm(ItemIdArg),
    /// Change an item's status
    Status(StatusArgs),
    /// Change an item's duration
    Minutes(MinutesArgs),
    /// Change an item's title
    Title(TitleArgs),
    /// Move an item before or after another item
    Mv(MvArgs),
    /// Project (tab) management
    Project(ProjectCmd),
    /// Write every project to a backup file
    Save(FileArg),
    /// Replace every project with the contents of a backup file
    Load(LoadArgs),
    /// Write a project's agenda as a Markdown table
    Export(ExportArgs),
}

// ---------------------------------------------------------------------------
// Item args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Project to list (default: current project)
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item title (blank becomes "Unnamed")
    pub title: String,
    /// Status (alignment, approval, help, decision, informed, review, escalation)
    #[arg(long)]
    pub status: Option<String>,
    /// Duration in minutes (default: 15)
    #[arg(long)]
    pub minutes: Option<u32>,
    /// Project to add to (default: current project)
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct ItemIdArg {
    /// Item ID
    pub id: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Item ID
    pub id: String,
    /// New status
    pub status: String,
}

#[derive(Args)]
pub struct MinutesArgs {
    /// Item ID
    pub id: String,
    /// Duration in minutes (1-999)
    pub minutes: u32,
}

#[derive(Args)]
pub struct TitleArgs {
    /// Item ID
    pub id: String,
    /// New title
    pub title: String,
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("side").required(true).args(["before", "after"])))]
pub struct MvArgs {
    /// Item ID to move
    pub id: String,
    /// Place before this item ID
    #[arg(long, value_name = "TARGET")]
    pub before: Option<String>,
    /// Place after this item ID
    #[arg(long, value_name = "TARGET")]
    pub after: Option<String>,
}

// ---------------------------------------------------------------------------
// Project management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ProjectCmd {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project and make it current
    Add(ProjectNameArg),
    /// Rename a project
    Rename(ProjectRenameArgs),
    /// Delete a project (never the last one)
    Delete(ProjectNameArg),
    /// Make a project current
    Switch(ProjectNameArg),
}

#[derive(Args)]
pub struct ProjectNameArg {
    /// Project name
    pub name: String,
}

#[derive(Args)]
pub struct ProjectRenameArgs {
    /// Current name
    pub old: String,
    /// New name
    pub new: String,
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct FileArg {
    /// File path
    pub file: String,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Backup file to read
    pub file: String,
    /// Confirm replacing all current projects
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Markdown file to write
    pub file: String,
    /// Project to export (default: current project)
    #[arg(long)]
    pub project: Option<String>,
}

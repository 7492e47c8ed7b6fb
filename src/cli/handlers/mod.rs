use std::error::Error;
use std::path::Path;

use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store::{AgendaStore, load_or_default, save_store};
use crate::io::{backup, export};
use crate::model::{ItemId, MAX_MINUTES, ProjectStore, Status};
use crate::ops::item_ops::{self, NewItem};
use crate::ops::project_ops::{self, Renamed};
use crate::ops::reorder::{self, DropSide};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run one subcommand against the given state backend
pub fn dispatch(command: Commands, json: bool, backend: &dyn AgendaStore) -> CmdResult {
    let mut store = load_or_default(backend)?;
    match command {
        // Read commands
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Projects => cmd_projects(&store, json),

        // Item commands
        Commands::Add(args) => cmd_add(&mut store, backend, args, json),
        Commands::Rm(args) => cmd_rm(&mut store, backend, args),
        Commands::Status(args) => cmd_status(&mut store, backend, args),
        Commands::Minutes(args) => cmd_minutes(&mut store, backend, args),
        Commands::Title(args) => cmd_title(&mut store, backend, args),
        Commands::Mv(args) => cmd_mv(&mut store, backend, args),

        // Project management
        Commands::Project(cmd) => cmd_project(&mut store, backend, cmd),

        // Files
        Commands::Save(args) => cmd_save(&store, args),
        Commands::Load(args) => cmd_load(&mut store, backend, args),
        Commands::Export(args) => cmd_export(&store, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_id(raw: &str) -> Result<ItemId, Box<dyn Error>> {
    raw.parse::<ItemId>()
        .map_err(|_| format!("invalid item ID: {}", raw).into())
}

/// Find the project holding `raw`, returning its name and the parsed ID
fn locate(store: &ProjectStore, raw: &str) -> Result<(String, ItemId), Box<dyn Error>> {
    let id = parse_id(raw)?;
    let project = item_ops::project_of(store, id)
        .ok_or_else(|| format!("item not found: {}", raw))?
        .to_string();
    Ok((project, id))
}

/// Resolve an optional `--project` flag, defaulting to the current project
fn project_or_current(store: &ProjectStore, project: Option<String>) -> Result<String, Box<dyn Error>> {
    match project {
        Some(name) if !store.contains(&name) => Err(format!("project not found: {}", name).into()),
        Some(name) => Ok(name),
        None => Ok(store.current_name().to_string()),
    }
}

fn parse_status(raw: &str) -> Result<Status, Box<dyn Error>> {
    Status::parse(raw).ok_or_else(|| {
        let keys: Vec<&str> = Status::ALL.iter().map(|s| s.key()).collect();
        format!("unknown status '{}' (expected one of: {})", raw, keys.join(", ")).into()
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &ProjectStore, args: ListArgs, json: bool) -> CmdResult {
    let project = project_or_current(store, args.project)?;
    let items = store.items(&project).unwrap_or(&[]);
    if json {
        return print_json(&agenda_to_json(&project, items));
    }
    print!("{}", format_agenda(&project, items));
    Ok(())
}

fn cmd_projects(store: &ProjectStore, json: bool) -> CmdResult {
    if json {
        return print_json(&projects_to_json(store));
    }
    for (name, items) in store.projects() {
        println!(
            "{}",
            format_project_line(name, items, name == store.current_name())
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Item commands
// ---------------------------------------------------------------------------

fn cmd_add(store: &mut ProjectStore, backend: &dyn AgendaStore, args: AddArgs, json: bool) -> CmdResult {
    let project = project_or_current(store, args.project)?;
    let status = args.status.as_deref().map(parse_status).transpose()?;
    if let Some(minutes) = args.minutes
        && !(1..=MAX_MINUTES).contains(&minutes)
    {
        return Err(item_ops::ItemError::InvalidMinutes.into());
    }
    let id = item_ops::add_item(
        store,
        &project,
        NewItem {
            title: args.title,
            status,
            minutes: args.minutes,
        },
    )?;
    save_store(backend, store)?;

    let items = store.items(&project).unwrap_or(&[]);
    let position = items.iter().position(|i| i.id == id).unwrap_or(0) + 1;
    if json {
        if let Some(item) = items.get(position - 1) {
            return print_json(&item_to_json(position, item));
        }
        return Ok(());
    }
    println!("{}", id);
    Ok(())
}

fn cmd_rm(store: &mut ProjectStore, backend: &dyn AgendaStore, args: ItemIdArg) -> CmdResult {
    let (project, id) = locate(store, &args.id)?;
    let (_, item) = item_ops::delete_item(store, &project, id)?;
    save_store(backend, store)?;
    println!("{} deleted ({})", id, item.title);
    Ok(())
}

fn cmd_status(store: &mut ProjectStore, backend: &dyn AgendaStore, args: StatusArgs) -> CmdResult {
    let status = parse_status(&args.status)?;
    let (project, id) = locate(store, &args.id)?;
    item_ops::set_status(store, &project, id, status)?;
    save_store(backend, store)?;
    println!("{} \u{2192} {}", id, status);
    Ok(())
}

fn cmd_minutes(store: &mut ProjectStore, backend: &dyn AgendaStore, args: MinutesArgs) -> CmdResult {
    let (project, id) = locate(store, &args.id)?;
    item_ops::set_minutes(store, &project, id, args.minutes)?;
    save_store(backend, store)?;
    println!("{} \u{2192} {} min", id, args.minutes);
    Ok(())
}

fn cmd_title(store: &mut ProjectStore, backend: &dyn AgendaStore, args: TitleArgs) -> CmdResult {
    let (project, id) = locate(store, &args.id)?;
    item_ops::edit_title(store, &project, id, &args.title)?;
    save_store(backend, store)?;
    println!("{} title updated", id);
    Ok(())
}

fn cmd_mv(store: &mut ProjectStore, backend: &dyn AgendaStore, args: MvArgs) -> CmdResult {
    let (target_raw, side) = match (&args.before, &args.after) {
        (Some(target), None) => (target.as_str(), DropSide::Before),
        (None, Some(target)) => (target.as_str(), DropSide::After),
        _ => return Err("exactly one of --before or --after is required".into()),
    };
    let (project, id) = locate(store, &args.id)?;
    let (target_project, target) = locate(store, target_raw)?;
    if project != target_project {
        return Err(format!(
            "{} and {} are in different projects ({} / {})",
            id, target, project, target_project
        )
        .into());
    }

    let items = store
        .items_mut(&project)
        .ok_or_else(|| format!("project not found: {}", project))?;
    let moved = reorder::move_item(items, id, target, side)?;
    if moved.is_noop() {
        println!("{} already in place", id);
        return Ok(());
    }
    save_store(backend, store)?;
    info!(item = %id, from = moved.from, to = moved.to, "item reordered");
    println!("{} moved to position {}", id, moved.to + 1);
    Ok(())
}

// ---------------------------------------------------------------------------
// Project management
// ---------------------------------------------------------------------------

fn cmd_project(store: &mut ProjectStore, backend: &dyn AgendaStore, cmd: ProjectCmd) -> CmdResult {
    match cmd.action {
        ProjectAction::Add(args) => {
            let name = project_ops::add_project(store, &args.name)?;
            save_store(backend, store)?;
            println!("{} created", name);
        }
        ProjectAction::Rename(args) => {
            match project_ops::rename_project(store, &args.old, &args.new)? {
                Renamed::Changed => {
                    save_store(backend, store)?;
                    println!("{} renamed to {}", args.old, args.new.trim());
                }
                Renamed::Unchanged => println!("{} unchanged", args.old),
            }
        }
        ProjectAction::Delete(args) => {
            let items = project_ops::delete_project(store, &args.name)?;
            save_store(backend, store)?;
            println!("{} deleted ({} items)", args.name, items.len());
        }
        ProjectAction::Switch(args) => {
            project_ops::switch_project(store, &args.name)?;
            save_store(backend, store)?;
            println!("switched to {}", args.name);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

fn cmd_save(store: &ProjectStore, args: FileArg) -> CmdResult {
    let path = Path::new(&args.file);
    backup::save_backup(path, store)?;
    println!("saved {} projects to {}", store.len(), path.display());
    Ok(())
}

fn cmd_load(store: &mut ProjectStore, backend: &dyn AgendaStore, args: LoadArgs) -> CmdResult {
    // Validate first so a bad file is reported even without --yes
    let loaded = backup::load_backup(Path::new(&args.file))?;
    if !args.yes {
        return Err("This will replace all current projects. Re-run with --yes to continue".into());
    }
    store.replace_all(loaded);
    save_store(backend, store)?;
    println!("Projects loaded successfully");
    Ok(())
}

fn cmd_export(store: &ProjectStore, args: ExportArgs) -> CmdResult {
    let project = project_or_current(store, args.project)?;
    let items = store.items(&project).unwrap_or(&[]);
    let path = Path::new(&args.file);
    export::export_markdown(path, &project, items)?;
    println!("exported {} to {}", project, path.display());
    Ok(())
}

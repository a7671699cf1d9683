use super::args::{
    AuditCommand, Cli, Commands, ConfigCommand, RolesCommand, RosterCommand, StudentsCommand,
};
use super::handlers::{self, HandlerContext, roles::Change};
use crate::logging::{self, LogSink};
use anyhow::Result;
use rollcall_runtime::{Config, Rollcall, resolve_data_dir};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    let sink = match &cli.command {
        Some(Commands::Attendance { .. }) => LogSink::File(&data_dir),
        _ => LogSink::Stderr,
    };
    logging::init(cli.log_level, sink)?;

    let Some(command) = cli.command else {
        show_guidance(&data_dir)?;
        return Ok(());
    };

    let ctx = HandlerContext::new(cli.format);
    // Config commands must work even when config.toml does not parse
    let open = || Rollcall::open(data_dir.clone());

    match command {
        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&data_dir, &ctx),
            ConfigCommand::Init {
                force,
                school,
                default_class,
            } => handlers::config::init(&data_dir, force, school, default_class, &ctx),
        },

        Commands::Attendance { sheet, view } => {
            handlers::attendance::handle(&open()?, &sheet, view, &ctx)
        }

        Commands::Roster { command } => match command {
            RosterCommand::Show { sheet, view } => {
                handlers::roster::show(&open()?, &sheet, &view, &ctx)
            }
            RosterCommand::MarkAll { sheet, status } => {
                handlers::roster::mark_all(&open()?, &sheet, status, &ctx)
            }
            RosterCommand::Export {
                sheet,
                view,
                export_format,
                output,
                stdout,
            } => handlers::roster::export(
                &open()?,
                &sheet,
                &view,
                export_format.into(),
                output,
                stdout,
                &ctx,
            ),
        },

        Commands::Audit { command } => match command {
            AuditCommand::List {
                actor,
                action,
                search,
                since,
                until,
                limit,
            } => handlers::audit::list(
                &open()?,
                handlers::audit::ListArgs {
                    actor,
                    action,
                    search,
                    since,
                    until,
                    limit,
                },
                &ctx,
            ),
        },

        Commands::Roles { command } => match command {
            RolesCommand::List => handlers::roles::list(&open()?, &ctx),
            RolesCommand::Show { role } => handlers::roles::show(&open()?, &role, &ctx),
            RolesCommand::Create {
                id,
                name,
                description,
            } => handlers::roles::create(&open()?, &id, name.as_deref(), &description, &ctx),
            RolesCommand::Delete { role } => handlers::roles::delete(&open()?, &role, &ctx),
            RolesCommand::Grant { role, scope } => {
                handlers::roles::update(&open()?, &role, Change::Grant(scope), &ctx)
            }
            RolesCommand::Revoke { role, scope } => {
                handlers::roles::update(&open()?, &role, Change::Revoke(scope), &ctx)
            }
            RolesCommand::Toggle { role, scope } => {
                handlers::roles::update(&open()?, &role, Change::Toggle(scope), &ctx)
            }
        },

        Commands::Students { command } => match command {
            StudentsCommand::List { class } => {
                handlers::students::list(&open()?, class.as_deref(), &ctx)
            }
            StudentsCommand::Add {
                class,
                first_name,
                last_name,
                date_of_birth,
                guardian_name,
                guardian_phone,
                guardian_email,
                roll,
            } => handlers::students::add(
                &open()?,
                handlers::students::AddArgs {
                    class,
                    first_name,
                    last_name,
                    date_of_birth,
                    guardian_name,
                    guardian_phone,
                    guardian_email,
                    roll,
                },
                &ctx,
            ),
        },

        Commands::Demo { class } => handlers::demo::handle(&open()?, &class, &ctx),
    }
}

fn show_guidance(data_dir: &Path) -> Result<()> {
    let config = Config::load_from(&Config::path_in(data_dir))?;
    let has_classes = data_dir.join("classes").is_dir();

    println!("rollcall - keyboard-first class attendance\n");

    if !has_classes {
        println!("Get started:");
        println!("  rollcall demo                     # Seed a sample class");
        println!("  rollcall attendance --class demo  # Mark attendance\n");
    } else {
        println!("Quick commands:");
        println!("  rollcall attendance               # Mark today's attendance");
        println!("  rollcall roster show              # Print the roster");
        println!("  rollcall roster export            # Write a CSV");
        println!("  rollcall audit list               # Recent changes\n");
        if config.school.default_class.is_none() {
            println!("Tip: set a default class with");
            println!("  rollcall config init --default-class <CLASS>\n");
        }
    }

    println!("For more commands:");
    println!("  rollcall --help");

    Ok(())
}

use anyhow::{Context, Result};
use menu_nutrition_to_sqlite::{
    cli::{Cli, Commands, ReportArgs, RunArgs},
    loader::load_menu_csv,
    paths::resolve_database_path,
    report::{export_to_file, lowest_carb_restaurants, write_rank_json, RANK_LIMIT},
    rules::describe_rules,
    ui::{ConsoleUi, Phase, Ui, UiApp},
    writer::SqliteSession,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.command();

    if let Commands::Rules = command {
        print!("{}", describe_rules());
        return Ok(());
    }

    // Ask for the file before the full-screen view takes the terminal
    let input: Option<PathBuf> = match &command {
        Commands::Run(RunArgs { input, .. }) | Commands::Load { input } => Some(input.resolve()?),
        _ => None,
    };
    let db_path = resolve_database_path(cli.db.clone(), cli.data_dir.clone())?;

    if cli.plain {
        let mut ui = ConsoleUi::new();
        let summary = execute(&command, input.as_deref(), &db_path, &mut ui)?;
        println!("\n{}", summary);
    } else {
        let mut ui = UiApp::new()?;
        match execute(&command, input.as_deref(), &db_path, &mut ui) {
            Ok(summary) => ui.finish(&summary)?,
            Err(err) => {
                ui.restore()?;
                return Err(err);
            }
        }
    }

    Ok(())
}

fn execute(
    command: &Commands,
    input: Option<&Path>,
    db_path: &Path,
    ui: &mut impl Ui,
) -> Result<String> {
    let mut session = SqliteSession::open(db_path)?;
    let mut summary = Vec::new();

    if let Some(input) = input {
        let start = Instant::now();
        let loaded = load_menu_csv(input, &mut session, ui)
            .with_context(|| format!("Failed to load {:?}", input))?;
        ui.log(format!("DataLoad: {:.2}s", start.elapsed().as_secs_f64()));
        summary.push(format!("Loaded {:?} into {:?}: {}", input, db_path, loaded));
    }

    if let Commands::Run(RunArgs { report, .. }) | Commands::Report { report } = command {
        summary.push(run_report(&session, report, ui)?);
    }

    session.finalize()?;
    Ok(summary.join("\n"))
}

fn run_report(session: &SqliteSession, args: &ReportArgs, ui: &mut impl Ui) -> Result<String> {
    ui.set_phase(Phase::Reporting);

    let ranks = lowest_carb_restaurants(session.connection(), RANK_LIMIT)?;
    ui.show_ranking(&ranks);

    let exported = export_to_file(session.connection(), &args.export)?;
    ui.log(format!("Exported {} rows to {:?}", exported, args.export));

    if let Some(path) = &args.rank_json {
        write_rank_json(&ranks, path)?;
        ui.log(format!("Ranking written to {:?}", path));
    }

    Ok(format!(
        "Ranked {} restaurants, exported {} rows to {:?}",
        ranks.len(),
        exported,
        args.export
    ))
}

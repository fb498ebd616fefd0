use anyhow::{Context, Result};
use fml_manager::cli::commands::{PartyArgs, RemoveCommand, RenderCommand, RouteCommand, ValidateCommand};
use fml_manager::cli::output::*;
use fml_manager::cli::{Cli, Command};
use fml_manager::cluster::{ClusterResource, FileCluster, Settings};
use fml_manager::core::{Document, JobFile};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Route(cmd) => {
            let cluster = FileCluster::from_settings(&load_settings(&cli)?);
            run_route_command(cmd, &cluster).await?
        }
        Command::EntryPoint(_) => {
            let cluster = FileCluster::from_settings(&load_settings(&cli)?);
            let entry_point = cluster.get_entry_point().await?;
            println!("{}", serde_json::to_string_pretty(&entry_point)?);
        }
        Command::Render(cmd) => render_job(cmd)?,
        Command::Validate(cmd) => validate_job(cmd)?,
    }

    Ok(())
}

/// Settings file (if any) with command-line overrides applied
fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path).context("Failed to load cluster settings")?,
        None => Settings::default(),
    };

    if let Some(namespace) = &cli.namespace {
        settings.namespace = namespace.clone();
    }
    if let Some(name) = &cli.name {
        settings.name = name.clone();
    }
    if let Some(store) = &cli.store {
        settings.store = Some(store.clone());
    }

    Ok(settings)
}

async fn run_route_command(cmd: &RouteCommand, cluster: &dyn ClusterResource) -> Result<()> {
    let mut route_table = cluster
        .get_route_table()
        .await
        .context("Failed to load route table")?;

    match cmd {
        RouteCommand::List(list) => {
            if list.json {
                println!("{}", route_table.to_json_pretty()?);
                return Ok(());
            }
            if route_table.is_empty() {
                println!("{} Route table is empty", INFO);
                return Ok(());
            }
            println!("{} Route table ({} parties):", INFO, style(route_table.len()).cyan());
            for (party_id, entry_point) in route_table.get_party() {
                println!("{}", format_route(party_id, entry_point));
            }
        }
        RouteCommand::Add(args) | RouteCommand::Update(args) => {
            let party = upsert(&mut route_table, args);
            cluster.set_route_table(&route_table).await?;
            println!(
                "{} Party {} now routes to {}:{}",
                CHECK,
                style(party.get_id()).bold(),
                party.ip(),
                party.port()
            );
        }
        RouteCommand::Remove(RemoveCommand { ids }) => {
            let before = route_table.len();
            route_table.remove_party(ids);
            cluster.set_route_table(&route_table).await?;
            println!(
                "{} Removed {} of {} requested part{}",
                CHECK,
                style(before - route_table.len()).cyan(),
                ids.len(),
                if ids.len() == 1 { "y" } else { "ies" }
            );
        }
    }

    Ok(())
}

fn upsert(route_table: &mut fml_manager::RouteTable, args: &PartyArgs) -> fml_manager::Party {
    let party = args.to_party();
    if route_table.contains(party.get_id()) {
        println!("{} Replacing existing entry for {}", WARN, style(party.get_id()).bold());
    }
    route_table.add_party([&party]);
    party
}

fn render_job(cmd: &RenderCommand) -> Result<()> {
    let job = JobFile::from_file(&cmd.file).context("Failed to load job file")?;
    let rendered = job.render()?;

    let dsl = serde_json::to_string_pretty(&rendered.dsl)?;
    let conf = serde_json::to_string_pretty(&rendered.conf)?;

    match &cmd.out_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            let dsl_path = dir.join("dsl.json");
            let conf_path = dir.join("conf.json");
            std::fs::write(&dsl_path, dsl)?;
            std::fs::write(&conf_path, conf)?;
            println!("{} Wrote {}", CHECK, style(dsl_path.display()).dim());
            println!("{} Wrote {}", CHECK, style(conf_path.display()).dim());
        }
        None => {
            println!("{}", format_document("Pipeline (dsl)", &dsl));
            println!("{}", format_document("Job configuration (conf)", &conf));
        }
    }

    Ok(())
}

fn validate_job(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating job file...", INFO);

    let result = JobFile::from_file(&cmd.file).and_then(|job| {
        let config = job.to_config()?;
        Ok((job, config))
    });

    match result {
        Ok((job, config)) => {
            println!("{} Job file is valid!", CHECK);
            if let Some(name) = &job.name {
                println!("  Name: {}", style(name).bold());
            }
            println!("  Components: {}", style(job.components.len()).cyan());
            for warning in config.check_party_counts() {
                println!("  {} {}", WARN, style(warning).yellow());
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

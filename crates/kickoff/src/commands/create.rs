//! `kickoff create` command handler

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;
use console::style;
use kickoff_projects::{
    create_project, destination_for, ArchiveFetcher, GitFetcher, Prompter, RepositoryFetcher,
    TemplateRegistry,
};

use crate::cli::CreateArgs;
use crate::output;
use crate::prompt::TerminalPrompt;

/// Prompt for the project details, fetch the template and rename the package
pub async fn run(args: CreateArgs, registry: &TemplateRegistry) -> Result<()> {
    let request = Prompter::new(TerminalPrompt::new(registry), registry)
        .ask_with(args.name.as_deref(), args.template.as_deref())?;

    let cwd = current_dir()?;
    let destination = destination_for(&cwd, request.name())?;

    println!();
    println!(
        "    ✨ Creating project in {}.",
        style(destination.as_str()).yellow()
    );
    println!();

    let fetcher: Box<dyn RepositoryFetcher> = if args.clone {
        Box::new(GitFetcher::new())
    } else {
        Box::new(ArchiveFetcher::new().context("Failed to create HTTP client")?)
    };

    tracing::debug!("Fetching with the {} fetcher", fetcher.name());
    let spinner = output::spinner("🗃  Fetching template...");
    let result = create_project(&request, registry, fetcher.as_ref(), &cwd).await;
    spinner.finish_and_clear();

    match result {
        Ok(_) => {}
        Err(e) if e.is_fetch_error() => {
            // Reported once, in red; no error chain from main on top
            output::error(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    print_next_steps(request.name());
    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| anyhow!("Current directory is not valid UTF-8: {}", path.display()))
}

fn print_next_steps(name: &str) {
    println!();
    println!(
        "    🎉  {} {}.",
        style("Successfully created project").green(),
        style(name).yellow()
    );
    println!("    👉  Get started with the following commands:");
    println!();
    output::command(&format!("cd {}", name));
    output::command("npm install");
    output::command("npm start");
    println!();
}

//! Runs one parsed command line

use crate::browse;
use crate::cli::{Cli, Command, ListArgs};
use crate::config::{FileConfig, Settings};
use crate::dashboard::{Dashboard, DashboardOptions};
use crate::error::ConsoleError;
use crate::login;
use crate::render::render_page;
use crate::screen::Screen;
use crate::session_store::FileSessionStore;
use anyhow::{bail, Context};
use gst_client::{ApiClient, CompanyApi, Credentials};
use gst_types::GstinError;
use gst_view::{FilterField, SortSpec};
use tokio::io::BufReader;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(file, |key| std::env::var(key).ok(), cli.overrides());
    tracing::debug!(?settings, "Resolved configuration");

    let store = FileSessionStore::new(&settings.session_file);
    let api = ApiClient::new(&settings.api_url, settings.request_timeout)?;
    let options = DashboardOptions {
        export_dir: settings.export_dir.clone(),
        refresh: settings.refresh,
    };

    match cli.command {
        Command::Login {
            username,
            password,
            admin,
        } => {
            let credentials = Credentials::new(username, password, admin);
            match login::login(&api, &store, &credentials).await {
                Ok(screen) => println!(
                    "Logged in. Open your dashboard with: gst-console browse --screen {}",
                    screen
                ),
                Err(err) => bail!(login::failure_message(&err)),
            }
        }

        Command::Logout => {
            login::logout(&store)?;
            println!("Logged out.");
        }

        Command::List { screen, args } => {
            let mut dashboard = mount(api, &store, screen, options).await?;
            if let Some(notice) = apply_list_args(&mut dashboard, &args) {
                println!("{}", notice);
            }
            print!(
                "{}",
                render_page(screen, &dashboard.view(), dashboard.state().sort())
            );
        }

        Command::Add { gstin } => {
            let mut dashboard = mount(api, &store, Screen::Admin, options).await?;
            if dashboard.add_company(&gstin).await? {
                println!("{} fetched.", gstin.trim().to_uppercase());
            } else {
                bail!("{} is not listed yet; check the log for details", gstin.trim());
            }
        }

        Command::Edit {
            id,
            status,
            turnover,
            screen,
        } => {
            let mut dashboard = mount(api, &store, screen, options).await?;
            dashboard.open_edit(id)?;
            if let Some(status) = status {
                dashboard.edit_mut().set_status(status)?;
            }
            if let Some(turnover) = turnover {
                dashboard.edit_mut().set_turnover(turnover)?;
            }
            if !dashboard.submit_edit().await? {
                bail!("Update of record {} failed", id);
            }
            println!("Record {} updated.", id);
        }

        Command::Export { gstin, screen } => {
            let dashboard = mount(api, &store, screen, options).await?;
            match dashboard.export(&gstin).await {
                Some(path) => println!("Saved {}", path.display()),
                None => bail!("No summary written for {}", gstin.trim()),
            }
        }

        Command::Check { gstin } => {
            let mut dashboard = mount(api, &store, Screen::Checker, options).await?;
            if let Some(notice) = dashboard.search(&gstin) {
                bail!(notice.to_string());
            }
            print!(
                "{}",
                render_page(Screen::Checker, &dashboard.view(), dashboard.state().sort())
            );
        }

        Command::Browse { screen } => {
            let mut dashboard = mount(api, &store, screen, options).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run(&mut dashboard, stdin, &mut std::io::stdout())
                .await
                .context("browse session ended with an error")?;
        }
    }

    Ok(())
}

async fn mount<A: CompanyApi>(
    api: A,
    store: &FileSessionStore,
    screen: Screen,
    options: DashboardOptions,
) -> anyhow::Result<Dashboard<A>> {
    match Dashboard::mount(api, store, screen, options).await {
        Ok(dashboard) => Ok(dashboard),
        Err(ConsoleError::Gate(reason)) => {
            bail!("{}; run `gst-console login` first", reason)
        }
        Err(err) => Err(err.into()),
    }
}

/// Feed list flags through the same inputs the interactive screen uses.
///
/// Returns the search validation message, if the screen produced one.
pub fn apply_list_args<A: CompanyApi>(
    dashboard: &mut Dashboard<A>,
    args: &ListArgs,
) -> Option<GstinError> {
    let text_filters = [
        (FilterField::LegalName, &args.name),
        (FilterField::Gstin, &args.gstin),
        (FilterField::State, &args.state),
    ];
    for (field, value) in text_filters {
        if let Some(value) = value {
            dashboard.set_filter(field, value.as_str());
        }
    }
    if let Some(status) = &args.status {
        dashboard.set_status_filter(status.clone());
    }
    let notice = args
        .search
        .as_deref()
        .and_then(|search| dashboard.search(search));
    if let Some(key) = args.sort {
        dashboard.set_sort(Some(if args.desc {
            SortSpec::descending(key)
        } else {
            SortSpec::ascending(key)
        }));
    }
    dashboard.go_to(args.page);
    notice
}

//! Interactive browse loop
//!
//! Each input line is one user action (type into a filter, click a header,
//! change page, ...). After every action the page is derived again and
//! printed.

use crate::dashboard::Dashboard;
use crate::error::ConsoleError;
use crate::render::{render_edit, render_page};
use gst_client::CompanyApi;
use gst_types::ComplianceStatus;
use gst_view::{FilterField, SortKey, StatusFilter};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
commands:
  filter <name|gstin|state> [text]   set or clear a text filter
  status <all|Pass|Fail>             status filter
  search [text]                      GSTIN search (blank clears)
  sort <column>                      click a column header
  page <n> | next | prev             pagination
  reload                             refetch all records
  add <gstin>                        fetch a company into the backend
  export <gstin>                     write the summary PDF
  edit <id>                          open the edit form
  set status <Pass|Fail>             edit form: status
  set turnover <value>               edit form: annual turnover
  save | cancel                      edit form: submit or discard
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Filter(FilterField, String),
    Status(StatusFilter),
    Search(String),
    Sort(SortKey),
    Page(usize),
    Next,
    Previous,
    Reload,
    Add(String),
    Export(String),
    Edit(i64),
    SetStatus(ComplianceStatus),
    SetTurnover(String),
    Save,
    Cancel,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let required = |what: &str| -> Result<String, String> {
            if rest.is_empty() {
                Err(format!("{} needs {}", verb, what))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "filter" => {
                let (field, text) = match rest.split_once(char::is_whitespace) {
                    Some((field, text)) => (field, text.trim()),
                    None => (rest, ""),
                };
                BrowseCommand::Filter(field.parse()?, text.to_string())
            }
            "status" => match rest.parse::<StatusFilter>() {
                Ok(status) => BrowseCommand::Status(status),
                Err(never) => match never {},
            },
            "search" => BrowseCommand::Search(rest.to_string()),
            "sort" => BrowseCommand::Sort(required("a column")?.parse()?),
            "page" => BrowseCommand::Page(
                required("a number")?
                    .parse()
                    .map_err(|_| format!("'{}' is not a page number", rest))?,
            ),
            "next" | "n" => BrowseCommand::Next,
            "prev" | "previous" | "p" => BrowseCommand::Previous,
            "reload" => BrowseCommand::Reload,
            "add" => BrowseCommand::Add(required("a GSTIN")?),
            "export" => BrowseCommand::Export(required("a GSTIN")?),
            "edit" => BrowseCommand::Edit(
                required("a record id")?
                    .parse()
                    .map_err(|_| format!("'{}' is not a record id", rest))?,
            ),
            "set" => match rest.split_once(char::is_whitespace) {
                Some(("status", value)) => BrowseCommand::SetStatus(value.trim().parse()?),
                Some(("turnover", value)) => BrowseCommand::SetTurnover(value.trim().to_string()),
                _ => return Err("usage: set status <Pass|Fail> | set turnover <value>".into()),
            },
            "save" => BrowseCommand::Save,
            "cancel" => BrowseCommand::Cancel,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            other => return Err(format!("unknown command '{}' (try help)", other)),
        };
        Ok(Some(command))
    }
}

/// Apply one command. Returns false when the loop should stop.
pub async fn apply<A, W>(
    dashboard: &mut Dashboard<A>,
    command: BrowseCommand,
    out: &mut W,
) -> Result<bool, ConsoleError>
where
    A: CompanyApi,
    W: Write,
{
    match command {
        BrowseCommand::Filter(field, text) => dashboard.set_filter(field, text),
        BrowseCommand::Status(status) => dashboard.set_status_filter(status),
        BrowseCommand::Search(text) if text.is_empty() => dashboard.clear_search(),
        BrowseCommand::Search(text) => {
            if let Some(notice) = dashboard.search(&text) {
                writeln!(out, "{}", notice)?;
            }
        }
        BrowseCommand::Sort(key) => {
            dashboard.toggle_sort(key);
        }
        BrowseCommand::Page(page) => {
            dashboard.go_to(page);
        }
        BrowseCommand::Next => {
            dashboard.next_page();
        }
        BrowseCommand::Previous => {
            dashboard.previous_page();
        }
        BrowseCommand::Reload => {
            dashboard.reload().await;
        }
        BrowseCommand::Add(gstin) => {
            if !dashboard.add_company(&gstin).await? {
                writeln!(out, "{} is not listed yet", gstin)?;
            }
        }
        BrowseCommand::Export(gstin) => match dashboard.export(&gstin).await {
            Some(path) => writeln!(out, "Saved {}", path.display())?,
            None => writeln!(out, "No summary written for {}", gstin)?,
        },
        BrowseCommand::Edit(id) => dashboard.open_edit(id)?,
        BrowseCommand::SetStatus(status) => dashboard.edit_mut().set_status(status)?,
        BrowseCommand::SetTurnover(value) => dashboard.edit_mut().set_turnover(value)?,
        BrowseCommand::Save => {
            if !dashboard.submit_edit().await? {
                writeln!(out, "Update failed")?;
            }
        }
        BrowseCommand::Cancel => dashboard.edit_mut().cancel(),
        BrowseCommand::Help => writeln!(out, "{}", HELP)?,
        BrowseCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Print the current page and any open edit form
pub fn print_page<A, W>(dashboard: &Dashboard<A>, out: &mut W) -> std::io::Result<()>
where
    A: CompanyApi,
    W: Write,
{
    let view = dashboard.view();
    write!(
        out,
        "{}",
        render_page(dashboard.screen(), &view, dashboard.state().sort())
    )?;
    if let Some(form) = render_edit(dashboard.edit().state()) {
        writeln!(out, "{}", form)?;
    }
    Ok(())
}

/// Read commands until `quit` or end of input, printing the page after each
pub async fn run<A, R, W>(
    dashboard: &mut Dashboard<A>,
    input: R,
    out: &mut W,
) -> Result<(), ConsoleError>
where
    A: CompanyApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{} (type help for commands)", dashboard.profile().title)?;
    print_page(dashboard, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        match apply(dashboard, command, out).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err @ (ConsoleError::Gstin(_) | ConsoleError::Edit(_) | ConsoleError::Unsupported(_))) => {
                writeln!(out, "{}", err)?;
            }
            Err(err) => return Err(err),
        }
        print_page(dashboard, out)?;
    }
    Ok(())
}

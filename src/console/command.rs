//! Console command grammar.

use crate::errors::{AppError, FormField};
use crate::models::Department;
use crate::session::Session;
use crate::views::{RemoteQuery, StatusFilter};

pub const HELP: &str = "\
Commands:
  list | refresh              reload every record from the server
  find <text>                 filter by name or email (no text clears)
  dept <department|all>       filter by department
  status <all|active|inactive>
  clear                       reset all filters
  query all|active            load a server-side listing
  query dept <department>
  query name <first> <last>
  departments | positions     show values known to the server
  new                         open an empty form
  view <id>                   show one record
  edit [<id>]                 edit a record (no id: the one being viewed)
  set <field> <value>         fields: first last email phone dept position salary start
  active <yes|no>
  reset                       restore the form's initial values
  submit | cancel
  delete <id>                 asks for confirmation
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Find(String),
    Department(Option<Department>),
    Status(StatusFilter),
    ClearFilters,
    Query(RemoteQuery),
    Departments,
    Positions,
    New,
    View(i64),
    Edit(Option<i64>),
    Set(FormField, String),
    Active(bool),
    Reset,
    Submit,
    Cancel,
    Delete(i64),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "list" | "refresh" => Command::Refresh,
        "find" => Command::Find(rest.to_string()),
        "dept" => Command::Department(parse_department_filter(rest)?),
        "status" => Command::Status(rest.parse()?),
        "clear" => Command::ClearFilters,
        "query" => Command::Query(parse_query(rest)?),
        "departments" => Command::Departments,
        "positions" => Command::Positions,
        "new" => Command::New,
        "view" => Command::View(parse_id(rest)?),
        "edit" if rest.is_empty() => Command::Edit(None),
        "edit" => Command::Edit(Some(parse_id(rest)?)),
        "set" => {
            let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::Set(field_from_key(key)?, value.trim().to_string())
        }
        "active" => Command::Active(parse_bool(rest)?),
        "reset" => Command::Reset,
        "submit" | "save" => Command::Submit,
        "cancel" | "back" => Command::Cancel,
        "delete" | "rm" => Command::Delete(parse_id(rest)?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command {:?}; type `help`", other)),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_| format!("Expected a numeric record id, got {:?}", raw))
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => Ok(true),
        "no" | "n" | "false" | "off" => Ok(false),
        other => Err(format!("Expected yes or no, got {:?}", other)),
    }
}

fn parse_department(raw: &str) -> Result<Department, String> {
    Department::ALL
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            let labels: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
            format!("Unknown department {:?}; one of: {}", raw, labels.join(", "))
        })
}

fn parse_department_filter(raw: &str) -> Result<Option<Department>, String> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        parse_department(raw).map(Some)
    }
}

fn parse_query(raw: &str) -> Result<RemoteQuery, String> {
    let (kind, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
    let rest = rest.trim();
    match kind.to_lowercase().as_str() {
        "" | "all" => Ok(RemoteQuery::All),
        "active" => Ok(RemoteQuery::Active),
        "dept" => parse_department(rest).map(RemoteQuery::Department),
        "name" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [first, last] => Ok(RemoteQuery::Name {
                first: first.to_string(),
                last: last.to_string(),
            }),
            _ => Err("Usage: query name <first> <last>".to_string()),
        },
        other => Err(format!("Unknown query {:?}", other)),
    }
}

fn field_from_key(key: &str) -> Result<FormField, String> {
    match key.to_lowercase().as_str() {
        "first" => Ok(FormField::FirstName),
        "last" => Ok(FormField::LastName),
        "email" => Ok(FormField::Email),
        "phone" => Ok(FormField::Phone),
        "dept" | "department" => Ok(FormField::Department),
        "position" => Ok(FormField::Position),
        "salary" => Ok(FormField::Salary),
        "start" => Ok(FormField::StartDate),
        other => Err(format!("Unknown field {:?}", other)),
    }
}

fn describe(err: &AppError) -> String {
    match err {
        AppError::Validation(_) => "Fix the highlighted fields and submit again".to_string(),
        other => other.message(),
    }
}

/// Apply a command, returning a message to print before the screen.
pub(super) async fn apply(session: &mut Session, command: Command) -> Option<String> {
    match command {
        Command::Refresh => {
            session.cancel();
            session.mount().await.err().map(|e| describe(&e))
        }
        Command::Find(text) => {
            session.list_mut().set_text(text);
            None
        }
        Command::Department(department) => {
            session.list_mut().set_department(department);
            None
        }
        Command::Status(status) => {
            session.list_mut().set_status(status);
            None
        }
        Command::ClearFilters => {
            session.list_mut().clear_filters();
            None
        }
        Command::Query(query) => {
            session.cancel();
            session.query(query).await.err().map(|e| describe(&e))
        }
        Command::Departments => match session.api().list_departments().await {
            Ok(names) => Some(names.join("\n")),
            Err(e) => Some(describe(&e)),
        },
        Command::Positions => match session.api().list_positions().await {
            Ok(names) => Some(names.join("\n")),
            Err(e) => Some(describe(&e)),
        },
        Command::New => {
            session.show_create();
            None
        }
        Command::View(id) => session.show_view(id).err().map(|e| describe(&e)),
        Command::Edit(Some(id)) => session.show_edit(id).err().map(|e| describe(&e)),
        Command::Edit(None) => session.edit_viewed().err().map(|e| e.to_string()),
        Command::Set(field, value) => match session.form_mut() {
            Some(form) => {
                form.form_mut().set(field, value);
                None
            }
            None => Some("No form is open; use `new` or `edit`".to_string()),
        },
        Command::Active(active) => match session.form_mut() {
            Some(form) => {
                form.form_mut().active = active;
                None
            }
            None => Some("No form is open; use `new` or `edit`".to_string()),
        },
        Command::Reset => match session.form_mut() {
            Some(form) => {
                form.reset();
                None
            }
            None => Some("No form is open".to_string()),
        },
        Command::Submit => match session.submit().await {
            Some(Ok(_)) => None,
            Some(Err(e)) => Some(describe(&e)),
            None => Some("No form is open; use `new` or `edit`".to_string()),
        },
        Command::Cancel => {
            session.cancel();
            None
        }
        Command::Help => Some(HELP.to_string()),
        // Handled by the input loop.
        Command::Delete(_) | Command::Quit => None,
    }
}

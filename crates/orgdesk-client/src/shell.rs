//! Line-oriented host for the client: parses one command per line, runs it
//! against the [`AppState`] and renders notifications and the active view.

use std::collections::HashMap;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;

use orgdesk_client::commands;
use orgdesk_client::events::{Level, Notification};
use orgdesk_client::state::AppState;
use orgdesk_client::views::{ActiveView, ViewData};
use orgdesk_shared::constants::{APP_NAME, EMPTY_CELL};
use orgdesk_shared::{AccountId, DepartmentId, EmployeeRecordId, Role};
use orgdesk_store::{
    AccountUpdate, DepartmentInput, EmployeeInput, ItemDraft, NewAccount, ProfileUpdate,
    Registration,
};

pub const HELP: &str = "\
commands:
  goto <location>                      route to a view, e.g. goto #/accounts
  register first=.. last=.. email=.. password=..
  verify                               simulate the email verification link
  login <email> <password>
  logout
  profile first=.. last=.. [password=..]
  request type=.. items=Name:qty,Name:qty
  account add first=.. last=.. email=.. password=.. [role=admin|employee] [verified=true]
  account edit <id> [first=..] [last=..] [email=..] [role=..] [verified=..] [password=..]
  account reset <id> <password>
  account delete <id>
  dept add name=.. [desc=..]
  dept edit <id> [name=..] [desc=..]
  dept delete <id>
  employee add code=.. email=.. position=.. dept=.. [hired=YYYY-MM-DD]
  employee edit <id> [code=..] [email=..] [position=..] [dept=..] [hired=..]
  employee delete <id>
  json                                 print the active view as JSON
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Help,
    Quit,
    Json,
    Goto(String),
    /// A domain command: verb words plus `key=value` fields.
    Command {
        words: Vec<String>,
        fields: HashMap<String, String>,
    },
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if quoted {
        bail!("unterminated quote");
    }
    if started {
        tokens.push(current);
    }
    Ok(tokens)
}

pub fn parse(line: &str) -> Result<Option<Line>> {
    let tokens = tokenize(line)?;
    let Some(first) = tokens.first().cloned() else {
        return Ok(None);
    };

    let parsed = match first.as_str() {
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        "json" => Line::Json,
        "goto" => Line::Goto(tokens.get(1).cloned().unwrap_or_default()),
        // credentials are positional and may contain `=`
        "login" => Line::Command {
            words: tokens,
            fields: HashMap::new(),
        },
        _ => {
            let mut words = Vec::new();
            let mut fields = HashMap::new();
            for token in tokens {
                match token.split_once('=') {
                    Some((k, v)) => {
                        fields.insert(k.to_lowercase(), v.to_string());
                    }
                    None => words.push(token),
                }
            }
            Line::Command { words, fields }
        }
    };
    Ok(Some(parsed))
}

/// `Laptop:2,Mouse:1`.  A missing or unreadable quantity counts as zero
/// and the line is dropped by the store.
pub fn parse_items(raw: &str) -> Vec<ItemDraft> {
    raw.split(',')
        .map(|part| match part.rsplit_once(':') {
            Some((name, qty)) => ItemDraft::new(name, qty.trim().parse().unwrap_or(0)),
            None => ItemDraft::new(part, 0),
        })
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => bail!("expected true/false, got '{other}'"),
    }
}

fn parse_role(raw: &str) -> Result<Role> {
    Role::try_from(raw).map_err(|_| anyhow!("unknown role '{raw}'"))
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .with_context(|| format!("invalid date '{raw}'"))
}

struct Fields(HashMap<String, String>);

impl Fields {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn or(&self, key: &str, current: &str) -> String {
        self.get(key).unwrap_or(current).to_string()
    }
}

fn arg<'a>(words: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    words
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing {what}"))
}

/// Run one domain command.  Domain failures are already queued as
/// notifications, so only malformed input surfaces as `Err`.
pub fn execute(
    state: &mut AppState,
    words: &[String],
    fields: HashMap<String, String>,
) -> Result<()> {
    let f = Fields(fields);
    let verb: Vec<&str> = words.iter().take(2).map(String::as_str).collect();

    match verb.as_slice() {
        ["register", ..] => {
            let _ = commands::auth::register(
                state,
                Registration {
                    first_name: f.text("first"),
                    last_name: f.text("last"),
                    email: f.text("email"),
                    password: f.text("password"),
                },
            );
        }
        ["verify", ..] => {
            let _ = commands::auth::verify_pending(state);
        }
        ["login", ..] => {
            let email = arg(words, 1, "email")?;
            let password = arg(words, 2, "password")?;
            let _ = commands::auth::login(state, email, password);
        }
        ["logout", ..] => commands::auth::logout(state),
        ["profile", ..] => {
            let current = state
                .identity()
                .map(|i| (i.first_name, i.last_name))
                .unwrap_or_default();
            let _ = commands::profile::update_profile(
                state,
                ProfileUpdate {
                    first_name: f.or("first", &current.0),
                    last_name: f.or("last", &current.1),
                    password: f.get("password").map(str::to_string),
                },
            );
        }
        ["request", ..] => {
            let items = parse_items(f.get("items").unwrap_or_default());
            let _ = commands::requests::submit_request(state, &f.text("type"), items);
        }

        ["account", "add"] => {
            let role = match f.get("role") {
                Some(r) => parse_role(r)?,
                None => Role::Employee,
            };
            let verified = match f.get("verified") {
                Some(v) => parse_bool(v)?,
                None => false,
            };
            let _ = commands::accounts::create_account(
                state,
                NewAccount {
                    first_name: f.text("first"),
                    last_name: f.text("last"),
                    email: f.text("email"),
                    password: f.text("password"),
                    role,
                    verified,
                },
            );
        }
        ["account", "edit"] => {
            let id = AccountId::from(arg(words, 2, "account id")?);
            let current = state
                .store()
                .find_account(&id)
                .cloned()
                .ok_or_else(|| anyhow!("no account with id {id}"))?;
            let role = match f.get("role") {
                Some(r) => parse_role(r)?,
                None => current.role,
            };
            let verified = match f.get("verified") {
                Some(v) => parse_bool(v)?,
                None => current.verified,
            };
            let _ = commands::accounts::update_account(
                state,
                &id,
                AccountUpdate {
                    first_name: f.or("first", &current.first_name),
                    last_name: f.or("last", &current.last_name),
                    email: f.or("email", &current.email),
                    role,
                    verified,
                    password: f.get("password").map(str::to_string),
                },
            );
        }
        ["account", "reset"] => {
            let id = AccountId::from(arg(words, 2, "account id")?);
            let password = arg(words, 3, "new password")?;
            let _ = commands::accounts::reset_password(state, &id, password);
        }
        ["account", "delete"] => {
            let id = AccountId::from(arg(words, 2, "account id")?);
            let _ = commands::accounts::delete_account(state, &id);
        }

        ["dept", "add"] => {
            let input = DepartmentInput {
                name: f.text("name"),
                description: f.get("desc").map(str::to_string),
            };
            let _ = commands::departments::save_department(state, None, input);
        }
        ["dept", "edit"] => {
            let id = DepartmentId::from(arg(words, 2, "department id")?);
            let current = state
                .store()
                .find_department(&id)
                .cloned()
                .ok_or_else(|| anyhow!("no department with id {id}"))?;
            let input = DepartmentInput {
                name: f.or("name", &current.name),
                description: f.get("desc").map(str::to_string).or(current.description),
            };
            let _ = commands::departments::save_department(state, Some(&id), input);
        }
        ["dept", "delete"] => {
            let id = DepartmentId::from(arg(words, 2, "department id")?);
            let _ = commands::departments::delete_department(state, &id);
        }

        ["employee", "add"] => {
            let input = EmployeeInput {
                employee_id: f.text("code"),
                user_email: f.text("email"),
                position: f.text("position"),
                department_id: DepartmentId::from(f.get("dept").unwrap_or_default()),
                hire_date: parse_date(f.get("hired").unwrap_or_default())?,
            };
            let _ = commands::employees::save_employee(state, None, input);
        }
        ["employee", "edit"] => {
            let id = EmployeeRecordId::from(arg(words, 2, "employee id")?);
            let current = state
                .store()
                .find_employee(&id)
                .cloned()
                .ok_or_else(|| anyhow!("no employee with id {id}"))?;
            let hire_date = match f.get("hired") {
                Some(raw) => parse_date(raw)?,
                None => current.hire_date,
            };
            let input = EmployeeInput {
                employee_id: f.or("code", &current.employee_id),
                user_email: f.or("email", &current.user_email),
                position: f.or("position", &current.position),
                department_id: f
                    .get("dept")
                    .map(DepartmentId::from)
                    .unwrap_or(current.department_id),
                hire_date,
            };
            let _ = commands::employees::save_employee(state, Some(&id), input);
        }
        ["employee", "delete"] => {
            let id = EmployeeRecordId::from(arg(words, 2, "employee id")?);
            let _ = commands::employees::delete_employee(state, &id);
        }

        _ => bail!("unknown command '{}', try 'help'", words.join(" ")),
    }
    Ok(())
}

pub fn render_notification(n: &Notification) -> String {
    let tag = match n.level {
        Level::Info => "info",
        Level::Success => " ok ",
        Level::Warning => "warn",
        Level::Danger => "fail",
    };
    format!("[{tag}] {}", n.message)
}

pub fn render_view(view: &ActiveView) -> String {
    let mut out = format!("== {} ==\n", view.view.path());
    match &view.data {
        ViewData::Home => {
            out.push_str(&format!("Welcome to {APP_NAME}. Type 'help' for commands.\n"));
        }
        ViewData::Register => out.push_str("Create an account with 'register'.\n"),
        ViewData::Login => out.push_str("Log in with 'login <email> <password>'.\n"),
        ViewData::Verification { email } => {
            out.push_str(&format!("A verification link was sent to {email}. Type 'verify'.\n"));
        }
        ViewData::Profile(p) => {
            out.push_str(&format!("{}\n{}\nrole: {}\n", p.full_name, p.email, p.role));
        }
        ViewData::Requests(rows) => {
            if rows.is_empty() {
                out.push_str(EMPTY_CELL);
                out.push('\n');
            }
            for r in rows {
                out.push_str(&format!("{}  {}  {}  {}  {}\n", r.id, r.date, r.kind, r.items, r.status));
            }
        }
        ViewData::Accounts(rows) => {
            for a in rows {
                let verified = if a.verified { "verified" } else { "unverified" };
                out.push_str(&format!(
                    "{}  {}  {}  {}  {}\n",
                    a.id, a.full_name, a.email, a.role, verified
                ));
            }
        }
        ViewData::Departments(rows) => {
            for d in rows {
                out.push_str(&format!("{}  {}  {}\n", d.id, d.name, d.description));
            }
        }
        ViewData::Employees(rows) => {
            if rows.is_empty() {
                out.push_str(EMPTY_CELL);
                out.push('\n');
            }
            for e in rows {
                out.push_str(&format!(
                    "{}  {}  {}  {}  {}  {}  {}\n",
                    e.id, e.employee_id, e.full_name, e.user_email, e.position, e.department, e.hire_date
                ));
            }
        }
    }
    out
}

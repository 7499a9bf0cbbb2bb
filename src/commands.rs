//! Line commands for driving a document from stdin.

use anyhow::{Context, Result, anyhow, bail};
use sheetgrid_core::{CellRef, Document};
use sheetgrid_engine::engine::evaluate;

use crate::render::render_grid;

pub const HELP: &str = "\
Commands:
  set <REF> <text>     Write raw text into a cell
  get <REF>            Print a cell's display value
  raw <REF>            Print a cell's raw text
  clear <REF>          Blank a cell
  eval <text>          Evaluate text against the sheet without storing it
  show                 Render the grid
  list                 List non-blank cells
  click <REF>          Click a cell (reclick edits, depending on policy)
  dblclick <REF>       Open a cell for editing
  edit                 Open the selected cell for editing (Enter)
  type <text>          Replace the in-place editor text
  commit [text]        Commit text (default: editor or formula bar) to the selection
  tab [text]           Commit, then move one column right
  cancel               Leave edit mode without committing (Escape)
  bar <text>           Type into the formula bar
  up|down|left|right   Move the selection
  move <drow> <dcol>   Move the selection by an offset
  status               Print selection, edit state and formula bar
  help                 Show this help
  quit                 Exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(CellRef, String),
    Get(CellRef),
    Raw(CellRef),
    Clear(CellRef),
    Eval(String),
    Show,
    List,
    Click(CellRef),
    DoubleClick(CellRef),
    Edit,
    Type(String),
    Commit(Option<String>),
    Tab(Option<String>),
    Cancel,
    Bar(String),
    Move(isize, isize),
    Status,
    Help,
    Quit,
}

/// Split off the first word; the rest keeps everything after one separator.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(i) => {
            let sep_len = input[i..].chars().next().map_or(1, char::len_utf8);
            (&input[..i], &input[i + sep_len..])
        }
        None => (input, ""),
    }
}

fn parse_ref(word: &str) -> Result<CellRef> {
    if word.is_empty() {
        bail!("expected a cell reference");
    }
    Ok(word.parse::<CellRef>()?)
}

fn optional_text(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let (name, rest) = split_word(line);
        let cmd = match name.to_ascii_lowercase().as_str() {
            "set" => {
                let (cell, text) = split_word(rest);
                Command::Set(parse_ref(cell)?, text.to_string())
            }
            "get" => Command::Get(parse_ref(rest.trim())?),
            "raw" => Command::Raw(parse_ref(rest.trim())?),
            "clear" => Command::Clear(parse_ref(rest.trim())?),
            "eval" => Command::Eval(rest.to_string()),
            "show" => Command::Show,
            "list" => Command::List,
            "click" => Command::Click(parse_ref(rest.trim())?),
            "dblclick" => Command::DoubleClick(parse_ref(rest.trim())?),
            "edit" => Command::Edit,
            "type" => Command::Type(rest.to_string()),
            "commit" => Command::Commit(optional_text(rest)),
            "tab" => Command::Tab(optional_text(rest)),
            "cancel" => Command::Cancel,
            "bar" => Command::Bar(rest.to_string()),
            "up" => Command::Move(-1, 0),
            "down" => Command::Move(1, 0),
            "left" => Command::Move(0, -1),
            "right" => Command::Move(0, 1),
            "move" => {
                let (dr, dc) = split_word(rest);
                let dr = dr.parse().with_context(|| format!("invalid row offset: {dr:?}"))?;
                let dc = dc
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid column offset: {:?}", dc.trim()))?;
                Command::Move(dr, dc)
            }
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command: {other} (try 'help')")),
        };
        Ok(cmd)
    }
}

/// Outcome of running one command.
pub enum Outcome {
    Output(String),
    Silent,
    Quit,
}

/// Text a bare `commit`/`tab` writes: the editor text while editing,
/// otherwise the formula bar (the cell's own raw text).
fn pending_text(doc: &Document) -> String {
    if doc.is_editing() {
        doc.edit_buffer().to_string()
    } else {
        doc.formula_bar_text().to_string()
    }
}

pub fn execute(doc: &mut Document, cmd: Command) -> Result<Outcome> {
    let out = match cmd {
        Command::Set(cell, text) => {
            doc.set_cell(&cell, &text)?;
            return Ok(Outcome::Silent);
        }
        Command::Get(cell) => doc
            .evaluate_cell(&cell)
            .map(|e| e.to_string())
            .ok_or_else(|| anyhow!("{cell} is outside the sheet"))?,
        Command::Raw(cell) => doc
            .raw(&cell)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("{cell} is outside the sheet"))?,
        Command::Clear(cell) => {
            doc.clear_cell(&cell)?;
            return Ok(Outcome::Silent);
        }
        Command::Eval(text) => evaluate(&text, doc.sheet()).to_string(),
        Command::Show => render_grid(doc),
        Command::List => doc
            .sheet()
            .iter_non_blank()
            .map(|(cell, raw)| format!("{cell}\t{raw}\t{}", doc.display_value(cell.row, cell.col)))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Click(cell) => {
            doc.select_cell(cell.row, cell.col);
            return Ok(Outcome::Silent);
        }
        Command::DoubleClick(cell) => {
            doc.begin_edit(cell.row, cell.col);
            return Ok(Outcome::Silent);
        }
        Command::Edit => {
            if !doc.is_editing() {
                doc.begin_edit_selected();
            }
            return Ok(Outcome::Silent);
        }
        Command::Type(text) => {
            if !doc.is_editing() {
                bail!("not editing (use 'edit' first)");
            }
            doc.set_edit_buffer(&text);
            return Ok(Outcome::Silent);
        }
        Command::Commit(text) => {
            let text = text.unwrap_or_else(|| pending_text(doc));
            doc.commit_edit(&text)?;
            return Ok(Outcome::Silent);
        }
        Command::Tab(text) => {
            let text = text.unwrap_or_else(|| pending_text(doc));
            doc.commit_and_advance(&text)?;
            return Ok(Outcome::Silent);
        }
        Command::Cancel => {
            doc.cancel_edit();
            return Ok(Outcome::Silent);
        }
        Command::Bar(text) => {
            doc.formula_bar_input(&text)?;
            return Ok(Outcome::Silent);
        }
        Command::Move(dr, dc) => {
            if !doc.move_selection(dr, dc) {
                bail!("cannot move while editing (commit or cancel first)");
            }
            return Ok(Outcome::Silent);
        }
        Command::Status => format!(
            "{}{}\t{}",
            doc.status_label(),
            if doc.is_editing() { " (editing)" } else { "" },
            doc.formula_bar_text()
        ),
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Output(out))
}

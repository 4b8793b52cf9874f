use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use playground_core::editor::EditorEvent;
use playground_core::{EditorSession, Intent, Language, PlaygroundError, RunOutcome, RunTicket};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

pub const HELP: &str = r#"commands:
    lang <javascript|python|cpp>   switch language (discards edits)
    load <path>                    replace the buffer with a file
    font +|-                       grow or shrink the editor font
    dark                           toggle dark mode
    show                           print language, theme, font and buffer
    props                          print the editor widget props as JSON
    run                            send the buffer to the execution service
    help                           this text
    quit                           leave"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Lang(Language),
    Load(PathBuf),
    FontUp,
    FontDown,
    Dark,
    Show,
    Props,
    Run,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Empty);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    // The path is the rest of the line, spaces included.
    if head == "load" {
        if rest.is_empty() {
            bail!("load needs a path");
        }
        return Ok(ReplCommand::Load(PathBuf::from(rest)));
    }
    let mut parts = rest.split_whitespace();
    let arg = parts.next();
    if parts.next().is_some() {
        bail!("too many arguments for {}", head);
    }
    let command = match (head, arg) {
        ("lang", Some(name)) => ReplCommand::Lang(name.parse()?),
        ("lang", None) => bail!("lang needs a language name"),
        ("font", Some("+")) => ReplCommand::FontUp,
        ("font", Some("-")) => ReplCommand::FontDown,
        ("font", _) => bail!("font takes + or -"),
        ("dark", None) => ReplCommand::Dark,
        ("show", None) => ReplCommand::Show,
        ("props", None) => ReplCommand::Props,
        ("run", None) => ReplCommand::Run,
        ("help", None) => ReplCommand::Help,
        ("quit" | "exit", None) => ReplCommand::Quit,
        (other, _) => return Err(anyhow!("unknown command: {}", other)),
    };
    Ok(command)
}

/// Reads commands from stdin. Runs execute in a background task so the
/// prompt keeps accepting commands until the outcome arrives.
pub async fn run_repl(editor: &mut EditorSession) -> Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<RunOutcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<RunTicket> = None;

    println!("{}", HELP);
    loop {
        tokio::select! {
            Some(outcome) = outcome_rx.recv() => {
                if let Some(ticket) = pending.take() {
                    editor.complete_run(ticket, outcome);
                    print_output(editor);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        eprintln!("{}", err);
                        continue;
                    }
                };
                match command {
                    ReplCommand::Quit => break,
                    ReplCommand::Run => match editor.begin_run() {
                        Ok(ticket) => {
                            let executor = editor.executor();
                            let request = ticket.request().clone();
                            let tx = outcome_tx.clone();
                            tokio::spawn(async move {
                                let outcome = executor.execute(&request).await;
                                let _ = tx.send(outcome);
                            });
                            pending = Some(ticket);
                        }
                        Err(PlaygroundError::RunInFlight) => {
                            println!("a run is already in progress");
                        }
                        Err(err) => return Err(err.into()),
                    },
                    other => {
                        if let Err(err) = apply(editor, other) {
                            eprintln!("{:#}", err);
                        }
                    }
                }
            }
        }
    }

    if pending.is_some() {
        warn!("leaving with a run still in flight");
    }
    Ok(())
}

fn apply(editor: &mut EditorSession, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Lang(language) => editor.dispatch(Intent::SelectLanguage(language)),
        ReplCommand::Load(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            editor.handle_editor_event(EditorEvent::ContentChanged(text));
        }
        ReplCommand::FontUp => editor.dispatch(Intent::IncreaseFontSize),
        ReplCommand::FontDown => editor.dispatch(Intent::DecreaseFontSize),
        ReplCommand::Dark => editor.dispatch(Intent::ToggleDarkMode),
        ReplCommand::Show => print_state(editor),
        ReplCommand::Props => {
            let props = editor.editor_props().to_json()?;
            println!("{}", serde_json::to_string_pretty(&props)?);
        }
        ReplCommand::Help => println!("{}", HELP),
        ReplCommand::Empty => {}
        ReplCommand::Run | ReplCommand::Quit => {}
    }
    Ok(())
}

fn print_state(editor: &EditorSession) {
    let session = editor.session();
    println!(
        "language: {} ({})",
        session.language().label(),
        session.language()
    );
    println!("theme: {}", editor.theme());
    println!("font: {}", session.font_size());
    println!("state: {:?}", editor.state());
    println!("---");
    println!("{}", session.source_text());
    println!("---");
}

pub fn print_output(editor: &EditorSession) {
    if let Some(output) = editor.session().last_output() {
        println!("{}", output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repl_parses_commands() {
        assert_eq!(parse_command("lang python").unwrap(), ReplCommand::Lang(Language::Python));
        assert_eq!(parse_command("font +").unwrap(), ReplCommand::FontUp);
        assert_eq!(parse_command("font -").unwrap(), ReplCommand::FontDown);
        assert_eq!(parse_command("  run ").unwrap(), ReplCommand::Run);
        assert_eq!(parse_command("").unwrap(), ReplCommand::Empty);
        assert_eq!(
            parse_command("load main.cpp").unwrap(),
            ReplCommand::Load(PathBuf::from("main.cpp"))
        );
    }

    #[test]
    fn repl_load_keeps_spaces_in_path() {
        assert_eq!(
            parse_command("load  my projects/hello world.py ").unwrap(),
            ReplCommand::Load(PathBuf::from("my projects/hello world.py"))
        );
        assert!(parse_command("load").is_err());
    }

    #[test]
    fn repl_rejects_bad_input() {
        assert!(parse_command("lang rust").is_err());
        assert!(parse_command("lang").is_err());
        assert!(parse_command("font 3").is_err());
        assert!(parse_command("dark mode").is_err());
        assert!(parse_command("compile").is_err());
    }
}

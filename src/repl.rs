//! Line-oriented terminal driver for a mounted inbox view.
//!
//! Each input line is one command. Parsing is pure ([`parse_line`]); the
//! loop in [`run`] forwards parsed commands to an [`InboxHandle`] and writes
//! command output. Events are printed by whoever subscribes to the view.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{ErrorCode, InboxError};
use crate::inbox::InboxHandle;
use crate::keymap::{InputTarget, KeyChord, KeyParseError};
use crate::state::assistant::QuickAction;

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

const COMMANDS: &str = "\
commands:
  draft <text>        replace the composer draft
  send                send the composer draft
  say <text>          draft and send in one step
  query <text>        replace the assistant query
  ask <text>          submit <text> to the assistant
  submit              submit the current query
  quick <action>      run a quick action (listed below)
  add                 copy the assistant response into the composer
  resize <px>         set the viewport width
  toggle              toggle the assistant panel
  close               close the assistant panel
  key <target> <key>  composer|query, e.g. `key composer ctrl+enter`
  show                print the current snapshot
  help                print this help
  quit                tear the view down and exit
";

/// Command reference followed by the quick actions and their panel labels.
#[must_use]
pub fn help() -> String {
    let mut text = String::from(COMMANDS);
    text.push_str("quick actions:\n");
    for action in QuickAction::ALL {
        text.push_str(&format!("  {:<18}  {}\n", action.as_str(), action.label()));
    }
    text
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Draft(String),
    Send,
    Say(String),
    Query(String),
    Ask(String),
    Submit,
    Quick(QuickAction),
    Add,
    Resize(u32),
    Toggle,
    Close,
    Key { target: InputTarget, chord: KeyChord },
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid width: {0}")]
    InvalidWidth(String),
    #[error("{0}")]
    InvalidQuickAction(String),
    #[error(transparent)]
    Key(#[from] KeyParseError),
    #[error(transparent)]
    Inbox(#[from] InboxError),
    #[error("terminal io: {0}")]
    Io(#[from] std::io::Error),
}

impl ErrorCode for ReplError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "E_REPL_UNKNOWN_COMMAND",
            Self::MissingArgument(_)
            | Self::InvalidWidth(_)
            | Self::InvalidQuickAction(_)
            | Self::Key(_) => "E_REPL_BAD_ARGUMENT",
            Self::Inbox(e) => e.error_code(),
            Self::Io(_) => "E_REPL_IO",
        }
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`ReplError`] for unknown commands or bad arguments.
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, ReplError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "draft" => ReplCommand::Draft(rest.to_owned()),
        "send" => ReplCommand::Send,
        "say" => ReplCommand::Say(required("say", rest)?.to_owned()),
        "query" => ReplCommand::Query(rest.to_owned()),
        "ask" => ReplCommand::Ask(required("ask", rest)?.to_owned()),
        "submit" => ReplCommand::Submit,
        "quick" => {
            let action = required("quick", rest)?
                .parse::<QuickAction>()
                .map_err(ReplError::InvalidQuickAction)?;
            ReplCommand::Quick(action)
        }
        "add" => ReplCommand::Add,
        "resize" => {
            let px = required("resize", rest)?;
            let width = px.parse::<u32>().map_err(|_| ReplError::InvalidWidth(px.to_owned()))?;
            ReplCommand::Resize(width)
        }
        "toggle" => ReplCommand::Toggle,
        "close" => ReplCommand::Close,
        "key" => {
            let (target, chord) = required("key", rest)?
                .split_once(char::is_whitespace)
                .ok_or(ReplError::MissingArgument("key"))?;
            ReplCommand::Key { target: target.parse()?, chord: chord.trim().parse()? }
        }
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(ReplError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(command))
}

fn required<'a>(verb: &'static str, rest: &'a str) -> Result<&'a str, ReplError> {
    if rest.is_empty() { Err(ReplError::MissingArgument(verb)) } else { Ok(rest) }
}

/// Read commands from `input` until `quit` or end of input.
///
/// Parse errors are reported on `output` and the loop continues.
///
/// # Errors
///
/// Returns a [`ReplError`] if the terminal fails or the view is closed.
pub async fn run<R, W>(
    input: R,
    output: &mut W,
    handle: &InboxHandle,
    width: &watch::Sender<u32>,
) -> Result<(), ReplError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(code = err.error_code(), error = %err, "bad command");
                output.write_all(format!("error: {err}\n").as_bytes()).await?;
                continue;
            }
        };
        debug!(?command, "repl command");
        if command == ReplCommand::Quit {
            break;
        }
        execute(command, output, handle, width).await?;
        output.flush().await?;
    }
    Ok(())
}

async fn execute<W>(
    command: ReplCommand,
    output: &mut W,
    handle: &InboxHandle,
    width: &watch::Sender<u32>,
) -> Result<(), ReplError>
where
    W: AsyncWrite + Unpin,
{
    match command {
        ReplCommand::Draft(text) => handle.set_draft(text).await?,
        ReplCommand::Send => handle.send_message().await?,
        ReplCommand::Say(text) => {
            handle.set_draft(text).await?;
            handle.send_message().await?;
        }
        ReplCommand::Query(text) => handle.set_query(text).await?,
        ReplCommand::Ask(text) => handle.ask(text).await?,
        ReplCommand::Submit => handle.submit_query().await?,
        ReplCommand::Quick(action) => handle.quick_action(action).await?,
        ReplCommand::Add => handle.add_response_to_composer().await?,
        ReplCommand::Resize(px) => {
            width.send_replace(px);
        }
        ReplCommand::Toggle => handle.toggle_panel().await?,
        ReplCommand::Close => handle.close_panel().await?,
        ReplCommand::Key { target, chord } => handle.key_press(target, chord).await?,
        ReplCommand::Show => {
            let snapshot = handle.snapshot().await?;
            let json = serde_json::to_string_pretty(&snapshot).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
            output.write_all(json.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        ReplCommand::Help => output.write_all(help().as_bytes()).await?,
        ReplCommand::Quit => {}
    }
    Ok(())
}

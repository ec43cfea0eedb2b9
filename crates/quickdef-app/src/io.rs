use kanal::AsyncSender;
use quickdef_types::{AppEvent, Request};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Lookup(String),
    Explain(String),
    SetOnline(bool),
    Quit,
}

/// `word` looks up, `?word` explains, `:online` / `:offline` / `:quit` control the session
pub fn parse_line(line: &str) -> Option<InputCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        ":q" | ":quit" | ":exit" => InputCommand::Quit,
        ":online" => InputCommand::SetOnline(true),
        ":offline" => InputCommand::SetOnline(false),
        _ => match line.strip_prefix('?') {
            Some(word) => InputCommand::Explain(word.trim().to_string()),
            None => InputCommand::Lookup(line.to_string()),
        },
    };
    Some(command)
}

/// Reads commands line by line and feeds them to the event loop.
/// Always finishes by sending `InputClosed`.
pub async fn watcher_io<R>(
    reader: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("input watcher cancelled");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::debug!("input reached end of stream");
            break;
        };

        let event = match parse_line(&line) {
            None => continue,
            Some(InputCommand::Quit) => break,
            Some(InputCommand::Lookup(word)) => AppEvent::Request(Request::fetch_word_data(word)),
            Some(InputCommand::Explain(word)) => {
                AppEvent::Request(Request::explain_like_five(word))
            }
            Some(InputCommand::SetOnline(online)) => AppEvent::NetworkChanged { online },
        };

        event_tx.send(event).await?;
    }

    event_tx.send(AppEvent::InputClosed).await?;
    Ok(())
}

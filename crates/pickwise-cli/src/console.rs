// Line-oriented front end.
//
// Reads commands from an async line source, forwards them to the app
// orchestrator, and prints every UI update as plain text. Returns when the
// user quits, input ends, or the app closes the update channel.

use std::io::Write;

use pickwise_app::protocol::{UiUpdate, UserCommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::input::{parse_line, Input, HELP};
use crate::render::{render_report, render_status, render_targeted};

pub async fn run<R, W>(
    reader: R,
    mut out: W,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();

    loop {
        tokio::select! {
            // Drain pending updates before reading more input.
            biased;

            update = ui_rx.recv() => {
                match update {
                    Some(update) => print_update(&mut out, update)?,
                    None => {
                        info!("UI channel closed");
                        break;
                    }
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed, quitting");
                    let _ = cmd_tx.send(UserCommand::Quit).await;
                    break;
                };
                match parse_line(&line) {
                    Ok(Input::Command(UserCommand::Quit)) => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                    Ok(Input::Command(cmd)) => {
                        debug!("Command: {:?}", cmd);
                        if cmd_tx.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    Ok(Input::Help) => writeln!(out, "{HELP}")?,
                    Ok(Input::Empty) => {}
                    Err(e) => writeln!(out, "! {e}")?,
                }
            }
        }
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}

fn print_update<W: Write>(out: &mut W, update: UiUpdate) -> std::io::Result<()> {
    match update {
        UiUpdate::Report { roster, report } => write!(out, "{}", render_report(&roster, &report)),
        UiUpdate::SourceStatus(status) => writeln!(out, "{}", render_status(&status)),
        UiUpdate::Targeted { attr, candidates } => {
            write!(out, "{}", render_targeted(attr, &candidates))
        }
        UiUpdate::Notice(text) => writeln!(out, "! {text}"),
    }
}

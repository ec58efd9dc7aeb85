use std::io::BufRead;
use std::thread;

use crossbeam_channel::{Receiver, bounded};

use crate::command::{ConsoleCommand, HELP_TEXT, parse_line};

/// Spawn the detached stdin reader thread.
///
/// Each well-formed line becomes a [`ConsoleCommand`] on the returned
/// channel; malformed lines are logged and dropped. `help` is answered
/// directly on stdout since that is where the user is typing. The thread
/// ends quietly on stdin EOF or when the receiver is dropped.
pub fn spawn_reader() -> Receiver<ConsoleCommand> {
    let (tx, rx) = bounded(64);

    thread::Builder::new()
        .name("console-reader".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!("console read failed: {e}");
                        break;
                    }
                };
                match parse_line(&line) {
                    None => {}
                    Some(Ok(ConsoleCommand::Help)) => println!("{HELP_TEXT}"),
                    Some(Ok(cmd)) => {
                        if tx.send(cmd).is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => tracing::warn!("console: {e}"),
                }
            }
            tracing::debug!("console reader exiting");
        })
        .expect("spawn console reader thread");

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_starts_empty() {
        let rx = spawn_reader();
        assert!(rx.try_recv().is_err());
    }
}

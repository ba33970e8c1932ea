//! Human player reading typed lines.

use super::{Decision, Participant, Turn};
use anyhow::Result;
use duel_tictactoe::{Position, SessionSnapshot};
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Lines typed at the terminal, shared by every human at the board.
pub type InputLines = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Forwards stdin lines into a channel from a dedicated thread.
///
/// The thread is detached so a pending read never holds up shutdown.
pub fn spawn_stdin_reader() -> InputLines {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
        debug!("Stdin closed");
    });
    Arc::new(Mutex::new(rx))
}

/// Human player using typed input.
pub struct HumanPlayer {
    name: String,
    input: InputLines,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: InputLines) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }

    async fn read_line(&self) -> Option<String> {
        self.input.lock().await.recv().await
    }
}

/// Parses a typed move: a cell number, a square label, `end` or `quit`.
pub(crate) fn parse_turn(line: &str) -> Turn {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Turn::Quit,
        "e" | "end" => Turn::EndMatch,
        _ => Position::from_label_or_number(trimmed)
            .map_or_else(|| Turn::Unrecognised(trimmed.to_string()), Turn::Place),
    }
}

#[async_trait::async_trait]
impl Participant for HumanPlayer {
    async fn next_turn(&mut self, _snapshot: &SessionSnapshot) -> Result<Turn> {
        match self.read_line().await {
            Some(line) => Ok(parse_turn(&line)),
            None => {
                debug!(player = %self.name, "Input closed, leaving");
                Ok(Turn::Quit)
            }
        }
    }

    async fn decide(&mut self, choices: &[Decision]) -> Result<Option<Decision>> {
        let Some(line) = self.read_line().await else {
            return Ok(Some(Decision::Quit));
        };
        Ok(Decision::from_input(&line).filter(|decision| choices.contains(decision)))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_turn() {
        assert_eq!(parse_turn("5"), Turn::Place(Position::Center));
        assert_eq!(parse_turn(" top left "), Turn::Place(Position::TopLeft));
        assert_eq!(parse_turn("QUIT"), Turn::Quit);
        assert_eq!(parse_turn("end"), Turn::EndMatch);
        assert_eq!(parse_turn("11"), Turn::Unrecognised("11".to_string()));
    }

    #[tokio::test]
    async fn test_decide_rejects_unoffered_choice() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut human = HumanPlayer::new("Ada", Arc::new(Mutex::new(rx)));
        tx.send("n".to_string()).unwrap();
        tx.send("r".to_string()).unwrap();
        drop(tx);

        let choices = [Decision::ResetMatch, Decision::Quit];
        assert_eq!(human.decide(&choices).await.unwrap(), None);
        assert_eq!(
            human.decide(&choices).await.unwrap(),
            Some(Decision::ResetMatch)
        );
        assert_eq!(human.decide(&choices).await.unwrap(), Some(Decision::Quit));
    }
}

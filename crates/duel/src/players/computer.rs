//! Computer player pacing the session's move engine.

use super::{Participant, Turn};
use anyhow::Result;
use duel_tictactoe::SessionSnapshot;
use std::time::Duration;
use tracing::debug;

/// Computer opponent. The session's engine picks the square; this player
/// only adds a short pause so moves don't appear instantly.
pub struct ComputerPlayer {
    name: String,
    delay: Duration,
}

impl ComputerPlayer {
    /// Creates a new computer player.
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Participant for ComputerPlayer {
    async fn next_turn(&mut self, _snapshot: &SessionSnapshot) -> Result<Turn> {
        debug!(computer = %self.name, delay = ?self.delay, "Thinking");
        tokio::time::sleep(self.delay).await;
        Ok(Turn::ComputerMove)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_tictactoe::{GameSession, SessionConfig};

    #[tokio::test]
    async fn test_computer_defers_to_engine() {
        let session = GameSession::seeded(SessionConfig::default(), 3);
        let mut computer = ComputerPlayer::new("Computer", Duration::ZERO);
        let turn = computer.next_turn(&session.snapshot()).await.unwrap();
        assert_eq!(turn, Turn::ComputerMove);
        assert!(computer.is_computer());
        assert_eq!(computer.name(), "Computer");
    }
}

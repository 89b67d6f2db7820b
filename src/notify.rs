//! Transient per-screen status messages.
//!
//! A message shown with [`Notifier::show`] reverts to the screen's default
//! text after [`STATUS_DELAY`]. Each `show` bumps a generation; only the
//! reversion scheduled by the latest `show` may fire.

use std::time::Duration;

use tokio::time::Instant;

/// How long a transient message stays up.
pub const STATUS_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug)]
struct Pending {
    generation: u64,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Notifier {
    default: String,
    message: Option<String>,
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
}

impl Notifier {
    pub fn new(default: impl Into<String>, delay: Duration) -> Self {
        Self {
            default: default.into(),
            message: None,
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Show `message` now and schedule its reversion. Any earlier pending
    /// reversion is replaced. Returns the generation of this message.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.pending = Some(Pending {
            generation: self.generation,
            deadline: Instant::now() + self.delay,
        });
        self.generation
    }

    /// Revert to the default text if `generation` is still the pending one.
    pub fn revert(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(p) if p.generation == generation => {
                self.pending = None;
                self.message = None;
                true
            }
            _ => false,
        }
    }

    /// Fire the pending reversion if its deadline has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let due = self
            .pending
            .as_ref()
            .filter(|p| now >= p.deadline)
            .map(|p| p.generation);
        match due {
            Some(generation) => self.revert(generation),
            None => false,
        }
    }

    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.default)
    }

    pub fn is_showing(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[tokio::test(start_paused = true)]
    async fn test_newer_message_supersedes_older_reversion() {
        let mut status = Notifier::new("help", STATUS_DELAY);
        status.show("first");
        time::advance(Duration::from_secs(1)).await;
        status.show("second");

        time::advance(Duration::from_secs(1)).await;
        // t=2: the first message's deadline (t=3) has not passed yet
        assert!(!status.expire(Instant::now()));
        assert_eq!(status.text(), "second");

        time::advance(Duration::from_millis(1500)).await;
        // t=3.5: the first deadline would have fired here, but it was replaced
        assert!(!status.expire(Instant::now()));
        assert_eq!(status.text(), "second");

        time::advance(Duration::from_millis(500)).await;
        // t=4
        assert!(status.expire(Instant::now()));
        assert_eq!(status.text(), "help");
        assert!(!status.expire(Instant::now()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_revert_ignores_stale_generation() {
        let mut status = Notifier::new("help", STATUS_DELAY);
        let old = status.show("one");
        let new = status.show("two");
        assert!(new > old);

        assert!(!status.revert(old));
        assert_eq!(status.text(), "two");
        assert!(status.revert(new));
        assert_eq!(status.text(), "help");
        assert!(!status.is_showing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_notifier_shows_default() {
        let mut status = Notifier::new("help", STATUS_DELAY);
        assert_eq!(status.text(), "help");
        time::advance(Duration::from_secs(10)).await;
        assert!(!status.expire(Instant::now()));
    }
}

//! Speech announcement seam.
//!
//! Audio playback lives outside the core; the registry flows and the reminder
//! scheduler only hand over the phrase to speak.

use crate::logging::sanitize_message;
use log::info;

const MAX_LOGGED_PHRASE_CHARS: usize = 120;

/// Receives phrases to speak. Return values are never consumed.
pub trait Announcer: Send + Sync {
    fn announce(&self, text: &str);
}

impl<F> Announcer for F
where
    F: Fn(&str) + Send + Sync,
{
    fn announce(&self, text: &str) {
        self(text)
    }
}

/// Announcer that writes phrases to the log instead of the speaker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&self, text: &str) {
        info!(
            "event=announce module=announce status=ok text={}",
            sanitize_message(text, MAX_LOGGED_PHRASE_CHARS)
        );
    }
}

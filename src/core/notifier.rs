//! Result Notifier
//!
//! Channel-backed delivery of flow outcomes for callback-style operations.

use tokio::sync::mpsc;

use crate::error::OidcError;
use crate::types::{AuthOutcome, TokenResponse};

/// Sending half handed to callback-style operations.
///
/// Cloning is cheap; every clone feeds the same receiver.
#[derive(Clone, Debug)]
pub struct ResultNotifier {
    sender: mpsc::UnboundedSender<AuthOutcome>,
}

/// Receiving half owned by the caller.
#[derive(Debug)]
pub struct OutcomeReceiver {
    receiver: mpsc::UnboundedReceiver<AuthOutcome>,
}

/// Create a connected notifier/receiver pair.
pub fn result_channel() -> (ResultNotifier, OutcomeReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ResultNotifier { sender }, OutcomeReceiver { receiver })
}

impl ResultNotifier {
    /// Deliver an outcome. Returns `false` if the receiver is gone.
    pub fn notify(&self, outcome: AuthOutcome) -> bool {
        let delivered = self.sender.send(outcome).is_ok();
        if !delivered {
            tracing::debug!("Outcome dropped: receiver closed");
        }
        delivered
    }

    /// Report a failure.
    pub fn auth_failure(&self, error: OidcError) -> bool {
        self.notify(AuthOutcome::Failure(error))
    }

    /// Report issued tokens.
    pub fn token_response(&self, tokens: TokenResponse) -> bool {
        self.notify(AuthOutcome::Tokens(tokens))
    }

    /// Report a password-grant override body.
    pub fn ropg_success(&self, message: String) -> bool {
        self.notify(AuthOutcome::RopgOverride(message))
    }
}

impl OutcomeReceiver {
    /// Wait for the next outcome. `None` once every notifier is dropped.
    pub async fn recv(&mut self) -> Option<AuthOutcome> {
        self.receiver.recv().await
    }

    /// Block the current thread for the next outcome.
    ///
    /// Must not be called from inside an async task.
    pub fn blocking_recv(&mut self) -> Option<AuthOutcome> {
        self.receiver.blocking_recv()
    }

    /// Take an outcome if one is already waiting.
    pub fn try_recv(&mut self) -> Option<AuthOutcome> {
        self.receiver.try_recv().ok()
    }
}

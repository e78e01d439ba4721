use tokio::sync::watch;

/// Tells background helpers (progress, resource monitor) that measurement has finished.
///
/// Dropping the handle has the same effect as calling [StopHandle::stop], so a helper can never
/// outlive the run that started it.
#[derive(Debug)]
pub struct StopHandle {
    sender: watch::Sender<bool>,
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StopHandle {
    pub fn new() -> Self {
        Self {
            sender: watch::channel(false).0,
        }
    }

    pub fn stop(&self) {
        // `send_replace` succeeds even when nobody is subscribed.
        let was_stopped = self.sender.send_replace(true);
        if !was_stopped {
            log::trace!("Stop signal sent");
        }
    }

    pub fn new_listener(&self) -> StopListener {
        StopListener {
            receiver: self.sender.subscribe(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StopListener {
    receiver: watch::Receiver<bool>,
}

impl StopListener {
    /// Point in time check. Returns true once the handle was stopped or dropped.
    pub fn should_stop(&self) -> bool {
        *self.receiver.borrow() || self.receiver.has_changed().is_err()
    }
}

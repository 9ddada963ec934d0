//! Region-exit signal.
//!
//! Whatever decides that a bullet has left its area (a trigger volume, a
//! bounds check, a test) sends the bullet's handle here. The pool drains the
//! channel with [`Pool::drain_exits`](crate::Pool::drain_exits) and releases
//! each handle. The channel is unbounded: a dropped exit would leak an entry.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::pool::PoolHandle;

/// Creates a connected exit sender/receiver pair.
#[must_use]
pub fn exit_channel() -> (ExitSender, ExitReceiver) {
    let (sender, receiver) = unbounded();
    (ExitSender { sender }, ExitReceiver { receiver })
}

/// Reports instances that left their region.
#[derive(Clone, Debug)]
pub struct ExitSender {
    sender: Sender<PoolHandle>,
}

impl ExitSender {
    /// Signals that `handle` exited. Returns `false` if the receiver is gone.
    #[inline]
    pub fn exit(&self, handle: PoolHandle) -> bool {
        self.sender.send(handle).is_ok()
    }
}

/// Pool side of the exit channel.
#[derive(Clone, Debug)]
pub struct ExitReceiver {
    receiver: Receiver<PoolHandle>,
}

impl ExitReceiver {
    /// Takes every pending exit without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = PoolHandle> + '_ {
        self.receiver.try_iter()
    }

    /// Returns the number of pending exits.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

use std::{
    sync::mpsc::{Receiver, RecvTimeoutError, SyncSender, TrySendError, sync_channel},
    time::Duration,
};

/// Create a connected pair of [`CloseHandle`] and [`ShutdownListener`]
pub(crate) fn shutdown_channel() -> (CloseHandle, ShutdownListener) {
    // A single slot is enough: one queued request already stops the reporter
    let (tx, rx) = sync_channel(1);
    (CloseHandle(tx), ShutdownListener(rx))
}

/// Handle that asks the reporter of a [`MonitoredReader`](crate::MonitoredReader) to stop
///
/// The handle can be cloned and sent to other threads.
/// Closing never blocks, no matter how often it is called or whether the
/// reporter has already exited.
#[derive(Debug, Clone)]
pub struct CloseHandle(SyncSender<()>);

impl CloseHandle {
    pub fn close(&self) {
        match self.0.try_send(()) {
            Ok(()) => tracing::trace!("requested reporter shutdown"),
            Err(TrySendError::Full(())) => tracing::trace!("reporter shutdown already requested"),
            Err(TrySendError::Disconnected(())) => tracing::trace!("reporter already exited"),
        }
    }
}

/// A [`CloseHandle`] that closes when it goes out of scope
#[derive(Debug)]
pub(crate) struct CloseOnDrop(pub(crate) CloseHandle);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.0.close();
    }
}

#[derive(Debug)]
pub(crate) struct ShutdownListener(Receiver<()>);

impl ShutdownListener {
    /// Sleep for up to `timeout`, waking early if a shutdown is requested
    ///
    /// # Returns
    /// - `true` if a shutdown was requested, or all [`CloseHandles`](CloseHandle) are gone
    /// - `false` if the full `timeout` passed
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.0.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) => false,
        }
    }
}

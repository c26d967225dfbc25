use std::future::Future;
use std::io;
use tokio::runtime::{Builder, Handle, Runtime};

/// The event loop driving transaction futures.
///
/// Wraps a tokio runtime the engine owns. Futures spawned here only make
/// progress while `block_on` is running, which keeps all notification
/// handling on the thread that called it.
pub struct EventLoopAdapter {
    runtime: Runtime,
}

impl EventLoopAdapter {
    /// A single-threaded loop with I/O and timers enabled.
    pub fn current_thread() -> io::Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .thread_name("ferrous-lookup-loop")
            .build()?;
        Ok(Self { runtime })
    }

    pub fn from_runtime(runtime: Runtime) -> Self {
        Self { runtime }
    }

    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(self.runtime.spawn(future));
    }

    /// Runs `future` to completion on the calling thread. Fails when the
    /// caller is already inside an async runtime.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, String> {
        if Handle::try_current().is_ok() {
            return Err("cannot drive the event loop from inside an async runtime".to_string());
        }
        Ok(self.runtime.block_on(future))
    }

    /// Stops the loop, dropping every task still pending on it.
    pub fn close(self) {
        self.runtime.shutdown_background();
    }
}

//! Background flush thread
//!
//! Sleeps on the session's condition variable for one flush interval, then
//! forces the buffer out. `Session::request_shutdown` wakes it early so
//! `stop()` never waits out a full interval.

use super::session::Session;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub(crate) fn spawn(session: Arc<Session>, interval: Duration) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("log-flusher".to_string())
        .spawn(move || run(&session, interval))
}

fn run(session: &Session, interval: Duration) {
    let mut state = session.state.lock();

    loop {
        let deadline = Instant::now() + interval;

        // Loop on spurious wakeups until the deadline or a shutdown request
        while !state.shutdown {
            if session.wake.wait_until(&mut state, deadline).timed_out() {
                break;
            }
        }

        if state.shutdown {
            return;
        }

        if let Err(e) = state.flush_buffer(&session.metrics) {
            session.report_failure("flushing log buffer in background", &e);
        }
    }
}

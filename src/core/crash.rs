//! Fault-signal crash reporting
//!
//! On `SIGSEGV` the handler flushes whatever is buffered, writes a report with
//! the time, the process id and the current stack, releases the destination and
//! exits with [`SIGNAL_FAULT_EXIT_CODE`].
//!
//! The handler finds the session through an atomic pointer rather than a lock.
//! It still has to take the session mutex to write, which is not
//! async-signal-safe: if the faulting thread already holds it the lock attempt
//! times out and the report goes straight to file descriptor 2 instead. Stack
//! capture and formatting allocate, so a fault inside the allocator can still
//! deadlock or abort the handler.

use super::error::{LoggerError, Result};
use super::session::Session;
use super::stack_trace::StackTrace;
use super::timestamp;
use std::io;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Process exit status after a fault signal was reported
pub const SIGNAL_FAULT_EXIT_CODE: i32 = 3;

/// How long the handler waits for the session lock before bypassing it
const CRASH_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// Session reachable from the signal handler; holds one strong count while set
static CRASH_SESSION: AtomicPtr<Session> = AtomicPtr::new(ptr::null_mut());

/// Keeps the crash handler installed; restores the default disposition on drop
#[derive(Debug)]
pub(crate) struct CrashGuard {
    _private: (),
}

/// Install the fault handler for `session`
pub(crate) fn install(session: &Arc<Session>) -> Result<CrashGuard> {
    publish(Some(Arc::clone(session)));

    // SAFETY: `action` is fully initialised before being passed to sigaction,
    // and `handle_fault` has the `extern "C" fn(c_int)` shape sa_sigaction
    // expects when SA_SIGINFO is not set.
    let installed = unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handle_fault as *const () as libc::sighandler_t;
        // Runs on the faulting thread's own stack: the per-thread alternate
        // stack is too small for stack capture. A fault inside the handler
        // falls back to the default action.
        action.sa_flags = libc::SA_RESETHAND;
        libc::sigemptyset(&mut action.sa_mask as *mut libc::sigset_t);
        libc::sigaction(libc::SIGSEGV, &action, ptr::null_mut()) == 0
    };

    if !installed {
        let source = io::Error::last_os_error();
        publish(None);
        return Err(LoggerError::SignalHandler {
            signal: libc::SIGSEGV,
            source,
        });
    }

    Ok(CrashGuard { _private: () })
}

impl Drop for CrashGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_default(libc::SIGSEGV) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
        publish(None);
    }
}

fn restore_default(signal: libc::c_int) -> Result<()> {
    // SAFETY: zeroed sigaction with SIG_DFL is a valid disposition.
    let restored = unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = libc::SIG_DFL;
        libc::sigemptyset(&mut action.sa_mask as *mut libc::sigset_t);
        libc::sigaction(signal, &action, ptr::null_mut()) == 0
    };
    if restored {
        Ok(())
    } else {
        Err(LoggerError::SignalHandler {
            signal,
            source: io::Error::last_os_error(),
        })
    }
}

/// Swap the handler-visible session, releasing the previous strong count
fn publish(session: Option<Arc<Session>>) {
    let raw = session.map_or(ptr::null_mut(), |s| Arc::into_raw(s) as *mut Session);
    let previous = CRASH_SESSION.swap(raw, Ordering::SeqCst);
    if !previous.is_null() {
        // SAFETY: every non-null pointer stored here came from Arc::into_raw.
        unsafe { drop(Arc::from_raw(previous)) };
    }
}

/// Header lines of a crash report
pub(crate) fn crash_report(time: &str, pid: u32, trace: &StackTrace) -> String {
    let mut report = format!("\n*** Aborted at {} ***", time);
    report.push_str(&trace.render(&format!(
        "*** SIGSEGV received by PID {}; stack trace: ***",
        pid
    )));
    report
}

extern "C" fn handle_fault(signum: libc::c_int) {
    let ptr = CRASH_SESSION.load(Ordering::SeqCst);
    if ptr.is_null() {
        // SA_RESETHAND already restored the default action; let it run
        // SAFETY: raise is async-signal-safe.
        unsafe { libc::raise(signum) };
        return;
    }

    // SAFETY: the pointer holds a strong count until `publish(None)`, which
    // only runs after the disposition has been restored.
    let session = unsafe { &*ptr };

    let time = timestamp::current_time();
    let trace = StackTrace::capture();
    let report = crash_report(&time, std::process::id(), &trace);

    match session.state.try_lock_for(CRASH_LOCK_TIMEOUT) {
        Some(mut state) => {
            state.shutdown = true;
            session.wake.notify_all();

            let metrics = &session.metrics;
            let _ = state.flush_buffer(metrics);
            // Standard error is written raw below, bypassing its std lock
            let written = match state.appender.as_mut() {
                Some(appender) if !appender.is_stderr() => appender
                    .write(report.as_bytes())
                    .and_then(|()| appender.flush())
                    .is_ok(),
                _ => false,
            };
            let _ = state.close(metrics);
            if !written {
                write_stderr_raw(report.as_bytes());
            }
        }
        None => write_stderr_raw(report.as_bytes()),
    }

    // SAFETY: _exit is async-signal-safe and skips atexit handlers.
    unsafe { libc::_exit(SIGNAL_FAULT_EXIT_CODE) };
}

/// Unbuffered, lock-free write to file descriptor 2
fn write_stderr_raw(mut bytes: &[u8]) {
    while !bytes.is_empty() {
        // SAFETY: the pointer and length describe a live slice.
        let n = unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
        if n <= 0 {
            return;
        }
        bytes = &bytes[n as usize..];
    }
}

// src/system/terminal.rs

use crate::constants::SIGNAL_EXIT_BASE;
use nix::errno::Errno;
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use scopeguard::ScopeGuard;
use signal_hook::{
    consts::{SIGHUP, SIGINT, SIGTERM},
    iterator::Signals,
    low_level,
};
use std::io::{self, Stdin};
use std::os::fd::{AsFd, OwnedFd};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Could not read terminal attributes: {0}")]
    GetAttributes(#[source] Errno),
    #[error("Could not switch the terminal to raw mode: {0}")]
    SetAttributes(#[source] Errno),
    #[error("Could not duplicate the terminal descriptor: {0}")]
    Duplicate(#[source] io::Error),
    #[error("Could not install the signal handler: {0}")]
    SignalHandler(#[source] io::Error),
}

/// Signals that end the shell if they arrive while a line is being edited.
const TERMINATION_SIGNALS: [i32; 3] = [SIGINT, SIGTERM, SIGHUP];

/// Restores the captured terminal mode on `Fd` when dropped.
pub type RawModeGuard<Fd> = ScopeGuard<(Fd, Termios), fn((Fd, Termios))>;

/// The mode to restore while raw mode is engaged, shared with the signal thread.
struct SavedMode {
    fd: OwnedFd,
    mode: Termios,
}

static SAVED_MODE: Mutex<Option<SavedMode>> = Mutex::new(None);

/// Switches stdin to raw mode. See [`enable_raw_mode_on`].
pub fn enable_raw_mode() -> Result<Option<RawModeGuard<Stdin>>, TerminalError> {
    enable_raw_mode_on(io::stdin())
}

/// Switches `fd` to non-canonical, no-echo input delivered one byte at a time.
///
/// Returns `Ok(None)` when `fd` is not a terminal: there is no mode to change
/// and the caller reads the byte stream as is. Otherwise the returned guard
/// restores the previous mode when it goes out of scope, on every path.
pub fn enable_raw_mode_on<Fd: AsFd>(fd: Fd) -> Result<Option<RawModeGuard<Fd>>, TerminalError> {
    let original = match termios::tcgetattr(&fd) {
        Ok(mode) => mode,
        Err(Errno::ENOTTY) => {
            log::debug!("Input is not a terminal; reading without raw mode");
            return Ok(None);
        }
        Err(e) => return Err(TerminalError::GetAttributes(e)),
    };

    let mut raw = original.clone();
    raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
    if let Some(vmin) = raw
        .control_chars
        .get_mut(SpecialCharacterIndices::VMIN as usize)
    {
        *vmin = 1;
    }
    if let Some(vtime) = raw
        .control_chars
        .get_mut(SpecialCharacterIndices::VTIME as usize)
    {
        *vtime = 0;
    }

    // Publish before switching so a signal can never observe raw mode without
    // a way back.
    let handle = fd
        .as_fd()
        .try_clone_to_owned()
        .map_err(TerminalError::Duplicate)?;
    *lock_saved_mode() = Some(SavedMode {
        fd: handle,
        mode: original.clone(),
    });
    if let Err(e) = termios::tcsetattr(&fd, SetArg::TCSANOW, &raw) {
        lock_saved_mode().take();
        return Err(TerminalError::SetAttributes(e));
    }
    log::debug!("Terminal switched to raw mode");

    Ok(Some(scopeguard::guard(
        (fd, original),
        restore_mode::<Fd> as fn((Fd, Termios)),
    )))
}

fn restore_mode<Fd: AsFd>((fd, original): (Fd, Termios)) {
    lock_saved_mode().take();
    match termios::tcsetattr(&fd, SetArg::TCSANOW, &original) {
        Ok(()) => log::debug!("Terminal mode restored"),
        Err(e) => log::warn!("Failed to restore terminal mode: {}", e),
    }
}

fn lock_saved_mode() -> MutexGuard<'static, Option<SavedMode>> {
    SAVED_MODE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Starts a thread watching SIGINT, SIGTERM and SIGHUP.
///
/// While a line is being edited a signal restores the terminal and is then
/// re-raised with its default action, so the shell dies by that signal. At
/// any other time (a child is in the foreground) the signal is left to the
/// child and the shell keeps running.
pub fn install_restore_on_signal() -> Result<(), TerminalError> {
    let mut signals = Signals::new(TERMINATION_SIGNALS).map_err(TerminalError::SignalHandler)?;
    thread::Builder::new()
        .name("signal-restore".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                handle_termination_signal(signal);
            }
        })
        .map_err(TerminalError::SignalHandler)?;
    Ok(())
}

fn handle_termination_signal(signal: i32) {
    let Some(saved) = lock_saved_mode().take() else {
        log::debug!("Signal {} received while no line is being edited; ignoring", signal);
        return;
    };

    if let Err(e) = termios::tcsetattr(&saved.fd, SetArg::TCSANOW, &saved.mode) {
        log::warn!("Failed to restore terminal mode: {}", e);
    }
    eprintln!("\n{}", t!("signal.info.terminated"));

    if let Err(e) = low_level::emulate_default_handler(signal) {
        log::warn!("Could not re-raise signal {}: {}", signal, e);
    }
    // Only reached when the default action did not end the process.
    std::process::exit(exit_code_for_signal(signal));
}

/// The conventional shell status for a process ended by `signal`.
fn exit_code_for_signal(signal: i32) -> i32 {
    SIGNAL_EXIT_BASE + signal
}

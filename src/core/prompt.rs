//! Password acquisition.
//!
//! An explicit password is used verbatim. Otherwise the password is read
//! either from piped stdin (one line) or from the terminal with masked echo:
//! every typed glyph is shown as `*`, so the operator sees how many
//! characters were entered but never the characters themselves.
//!
//! The terminal helper is single-use: it borrows the terminal for one read
//! and keeps no state afterwards.

use std::io::{self, BufRead, IsTerminal, Write};

use console::{Key, Term};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{MASK_CHAR, PASSWORD_PROMPT};
use crate::error::InputError;

/// Source of key presses for [`read_masked`].
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Key>;
}

impl KeySource for Term {
    fn next_key(&mut self) -> io::Result<Key> {
        Term::read_key(self)
    }
}

/// Use `explicit` if given, otherwise ask for a password.
///
/// # Errors
///
/// Returns `InputError::Unavailable` when piped stdin is empty or neither
/// stderr nor stdout is a terminal, `InputError::Interrupted` on Ctrl-C read as a key,
/// and `InputError::Io` for other read failures.
pub fn acquire_password(explicit: Option<String>) -> Result<Zeroizing<String>, InputError> {
    if let Some(password) = explicit {
        debug!("using password from command line");
        return Ok(Zeroizing::new(password));
    }

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        debug!("reading password from stdin");
        return read_piped(stdin.lock());
    }

    let term = prompt_terminal(Term::stderr(), Term::stdout(), Term::is_term)
        .ok_or(InputError::Unavailable)?;

    debug!("prompting for password");
    let mut keys = term.clone();
    let mut echo = term;
    read_masked(&mut keys, &mut echo, PASSWORD_PROMPT)
}

/// First of `stderr` and `stdout` attached to a terminal, stderr winning
/// when both are.
fn prompt_terminal<T>(stderr: T, stdout: T, is_term: impl Fn(&T) -> bool) -> Option<T> {
    [stderr, stdout].into_iter().find(|t| is_term(t))
}

/// Read one password line from a non-interactive source.
///
/// Only the line terminator is stripped.
pub fn read_piped<R: BufRead>(mut reader: R) -> Result<Zeroizing<String>, InputError> {
    let mut line = Zeroizing::new(String::new());
    let n = reader.read_line(&mut line).map_err(InputError::Io)?;
    if n == 0 {
        return Err(InputError::Unavailable);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(line)
}

/// Show `prompt` on `echo` and read keys until Enter, echoing a mask per
/// glyph.
///
/// Backspace removes the last glyph and its mask. Control keys other than
/// Enter and Backspace are ignored.
pub fn read_masked<K, W>(
    keys: &mut K,
    echo: &mut W,
    prompt: &str,
) -> Result<Zeroizing<String>, InputError>
where
    K: KeySource,
    W: Write,
{
    write!(echo, "{}", prompt).map_err(InputError::Io)?;
    echo.flush().map_err(InputError::Io)?;

    let mut password = Zeroizing::new(String::new());

    loop {
        let key = keys.next_key().map_err(|e| match e.kind() {
            io::ErrorKind::Interrupted => InputError::Interrupted,
            _ => InputError::Io(e),
        })?;

        match key {
            Key::Enter => {
                writeln!(echo).map_err(InputError::Io)?;
                break;
            }
            Key::Backspace => {
                if password.pop().is_some() {
                    write!(echo, "\x08 \x08").map_err(InputError::Io)?;
                }
            }
            Key::Char('\u{3}') => return Err(InputError::Interrupted),
            Key::Char(c) if !c.is_control() => {
                password.push(c);
                write!(echo, "{}", MASK_CHAR).map_err(InputError::Io)?;
            }
            _ => continue,
        }

        echo.flush().map_err(InputError::Io)?;
    }

    echo.flush().map_err(InputError::Io)?;
    Ok(password)
}

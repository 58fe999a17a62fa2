//! `stagecrypt completions <shell>`.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::error::Result;

pub fn execute(shell: Shell) -> Result<()> {
    write_script(shell, &mut io::stdout().lock());
    Ok(())
}

/// Write the completion script for `shell` into `out`, named after the
/// binary declared on [`Cli`].
pub fn write_script<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin, out);
}

//! Shell completion scripts.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::HabitError;

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, HabitError> {
    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, HabitError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "habitvault", &mut buf);
    String::from_utf8(buf).map_err(|e| HabitError::invalid(format!("completion script is not UTF-8: {e}")))
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(habitvault completions bash)

# Or save to a file:
habitvault completions bash > /usr/local/etc/bash_completion.d/habitvault
"
        .to_string(),

        Shell::Zsh => r"# Add to ~/.zshrc (before compinit):
source <(habitvault completions zsh)

# Or save to your fpath:
habitvault completions zsh > ~/.zsh/completions/_habitvault
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
habitvault completions fish > ~/.config/fish/completions/habitvault.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
habitvault completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
habitvault completions elvish > ~/.elvish/lib/habitvault.elv

# Then add to ~/.elvish/rc.elv:
use habitvault
"
        .to_string(),

        _ => format!("# Redirect `habitvault completions {shell}` to your shell's completion directory\n"),
    }
}

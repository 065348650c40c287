//! Interactive credential capture for `--newlogin`

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use config::{parse_device_list, password_digest, Credentials};
use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};

/// Restores terminal echo on drop
struct EchoGuard {
    original: Termios,
}

impl EchoGuard {
    /// Turn echo off when stdin is a terminal; `None` otherwise
    fn disable() -> Result<Option<Self>> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return Ok(None);
        }

        let original = tcgetattr(&stdin).context("Failed to read terminal attributes")?;
        let mut silent = original.clone();
        silent.local_flags.remove(LocalFlags::ECHO);
        tcsetattr(&stdin, SetArg::TCSANOW, &silent).context("Failed to disable terminal echo")?;

        Ok(Some(Self { original }))
    }
}

impl Drop for EchoGuard {
    fn drop(&mut self) {
        let _ = tcsetattr(&io::stdin(), SetArg::TCSANOW, &self.original);
    }
}

/// Line-oriented prompt over any reader/writer pair
pub struct CredentialPrompt<R, W> {
    input: R,
    output: W,
    hide_secrets: bool,
}

impl CredentialPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on the process terminal
    pub fn terminal() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stderr(),
            hide_secrets: true,
        }
    }
}

impl<R: BufRead, W: Write> CredentialPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    /// Gather the account details, asking only for what was not supplied
    pub fn collect(
        &mut self,
        email: Option<&str>,
        devices: Option<&str>,
    ) -> Result<Credentials> {
        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(email) => email.to_string(),
            None => self.ask("Account email: ")?,
        };
        if email.is_empty() {
            bail!("An account email is required");
        }

        let devices = match devices {
            Some(list) => parse_device_list(list),
            None => parse_device_list(&self.ask("aGate serial number(s), comma separated: ")?),
        };
        if devices.is_empty() {
            bail!("At least one device identifier is required");
        }

        let password = self.ask_secret("Password: ")?;
        Ok(Credentials {
            email,
            devices,
            password: password_digest(&password),
        })
    }

    fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn ask_secret(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let guard = if self.hide_secrets {
            EchoGuard::disable()?
        } else {
            None
        };
        let line = self.read_line();
        if guard.is_some() {
            writeln!(self.output)?;
        }
        drop(guard);

        line
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            bail!("Input closed before all credentials were entered");
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collects_everything_from_input() {
        let input = Cursor::new("owner@example.com\n10060005A02X0000, 10060005A02X0001\npassword\n");
        let mut output = Vec::new();

        let credentials = CredentialPrompt::new(input, &mut output)
            .collect(None, None)
            .unwrap();

        assert_eq!(credentials.email, "owner@example.com");
        assert_eq!(credentials.devices, vec!["10060005A02X0000", "10060005A02X0001"]);
        assert_eq!(credentials.password, "5f4dcc3b5aa765d61d8327deb882cf99");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Account email: "));
        assert!(shown.contains("Password: "));
        assert!(!shown.contains("password\n"));
    }

    #[test]
    fn test_flags_skip_questions() {
        let input = Cursor::new("password\n");
        let mut output = Vec::new();

        let credentials = CredentialPrompt::new(input, &mut output)
            .collect(Some("owner@example.com"), Some("10060005A02X0000"))
            .unwrap();

        assert_eq!(credentials.devices, vec!["10060005A02X0000"]);
        let shown = String::from_utf8(output).unwrap();
        assert!(!shown.contains("Account email"));
    }

    #[test]
    fn test_missing_device_rejected() {
        let input = Cursor::new("owner@example.com\n\npassword\n");
        let result = CredentialPrompt::new(input, Vec::new()).collect(None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_closed_input_rejected() {
        let input = Cursor::new("owner@example.com\n");
        let result = CredentialPrompt::new(input, Vec::new()).collect(None, None);
        assert!(result.unwrap_err().to_string().contains("Input closed"));
    }
}

use std::io::Write;
use std::process::{Command, Stdio};

use crate::model::EmailConfig;

/// Error type for the email bridge
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("email is not configured (set [email] command in .notehub.toml)")]
    Unavailable,
    #[error("email command failed: {0}")]
    Failed(String),
}

/// Hand a note off to the configured external command. The note content
/// is piped to the command's stdin; `{title}` in any argv element is
/// replaced with the note title. Delivery details stay opaque; all we
/// report is success or failure.
pub fn send_note(config: &EmailConfig, title: &str, content: &str) -> Result<(), EmailError> {
    if !config.is_configured() {
        return Err(EmailError::Unavailable);
    }

    let argv: Vec<String> = config
        .command
        .iter()
        .map(|a| a.replace("{title}", title))
        .collect();

    let mut child = Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EmailError::Unavailable
            } else {
                EmailError::Failed(e.to_string())
            }
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        // The command may exit without reading; that alone isn't failure
        let _ = stdin.write_all(content.as_bytes());
    }
    drop(child.stdin.take());

    let status = child.wait().map_err(|e| EmailError::Failed(e.to_string()))?;
    if !status.success() {
        return Err(EmailError::Failed(format!("exit status {}", status)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> EmailConfig {
        EmailConfig {
            command: argv.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_unconfigured_is_unavailable() {
        let err = send_note(&EmailConfig::default(), "t", "body").unwrap_err();
        assert!(matches!(err, EmailError::Unavailable));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_send() {
        let cfg = config(&["sh", "-c", "cat > /dev/null"]);
        assert!(send_note(&cfg, "t", "body\n").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_command_is_unavailable() {
        let cfg = config(&["definitely-not-a-real-mailer-6a1f"]);
        assert!(matches!(
            send_note(&cfg, "t", "body").unwrap_err(),
            EmailError::Unavailable
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let cfg = config(&["sh", "-c", "exit 3"]);
        assert!(matches!(
            send_note(&cfg, "t", "body").unwrap_err(),
            EmailError::Failed(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_title_placeholder_substitution() {
        // The command only succeeds when {title} was substituted
        let cfg = config(&["sh", "-c", r#"test "$0" = "shopping""#, "{title}"]);
        assert!(send_note(&cfg, "shopping", "").is_ok());
    }
}

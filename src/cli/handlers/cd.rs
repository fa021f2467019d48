// src/cli/handlers/cd.rs

use crate::cli::{dispatcher::Flow, handlers::commons::BuiltinError};
use std::env;

/// Changes the process working directory to the single argument given.
pub fn handle(args: &[String]) -> Result<Flow, BuiltinError> {
    let target = match args {
        [] => return Err(BuiltinError::MissingOperand { command: "cd" }),
        [target] => target,
        _ => {
            return Err(BuiltinError::TooManyArguments {
                command: "cd",
                expected: 1,
                found: args.len(),
            });
        }
    };

    env::set_current_dir(target).map_err(|source| BuiltinError::ChangeDirectory {
        path: target.clone(),
        source,
    })?;

    log::debug!("Working directory is now '{}'", target);
    Ok(Flow::Continue)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // The working directory is process-wide; tests touching it take turns.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn cwd() -> PathBuf {
        env::current_dir().unwrap()
    }

    #[test]
    fn test_no_argument_is_a_usage_error() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = cwd();

        let err = handle(&[]).unwrap_err();

        assert!(err.is_usage_error());
        assert!(matches!(err, BuiltinError::MissingOperand { .. }));
        assert_eq!(cwd(), before);
    }

    #[test]
    fn test_two_arguments_are_a_usage_error() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = cwd();

        let err = handle(&["/".to_string(), "/tmp".to_string()]).unwrap_err();

        assert!(err.is_usage_error());
        assert_eq!(err.to_string(), "cd: expected 1 argument, got 2");
        assert_eq!(cwd(), before);
    }

    #[test]
    fn test_missing_directory_reports_the_reason() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = cwd();

        let err = handle(&["nonexistent-dir-for-rawsh-test".to_string()]).unwrap_err();

        assert!(!err.is_usage_error());
        let message = err.to_string();
        assert!(
            message.contains("No such file or directory"),
            "Error message was: {}",
            message
        );
        assert_eq!(cwd(), before);
    }

    #[test]
    fn test_changes_directory() {
        let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = cwd();
        let dir = TempDir::new().unwrap();
        let target = dir.path().canonicalize().unwrap();

        let flow = handle(&[target.display().to_string()]).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(cwd(), target);
        env::set_current_dir(before).unwrap();
    }
}

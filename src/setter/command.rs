use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use super::WallpaperSetter;

/// Runs `program args... <image path>` and expects a zero exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSetter {
    program: String,
    args: Vec<String>,
}

impl CommandSetter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `None` when `argv` is empty or names no program.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl WallpaperSetter for CommandSetter {
    async fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .with_context(|| format!("run {}", self.program))?;
        if !status.success() {
            return Err(anyhow!("{} exited with {}", self.program, status));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argv_splits_program() {
        let argv = vec!["swww".to_string(), "img".to_string()];
        let cmd = CommandSetter::from_argv(&argv).unwrap();
        assert_eq!(cmd, CommandSetter::new("swww", vec!["img".to_string()]));
        assert!(CommandSetter::from_argv(&[]).is_none());
        assert!(CommandSetter::from_argv(&[" ".to_string()]).is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_path_as_last_argument() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("applied");
        let script = format!("printf '%s' \"$0\" > {}", out.display());
        let cmd = CommandSetter::new("sh", vec!["-c".to_string(), script]);
        cmd.set_wallpaper(Path::new("/tmp/x/2024-01-01.jpg"))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "/tmp/x/2024-01-01.jpg"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_error() {
        let cmd = CommandSetter::new("false", vec![]);
        assert!(cmd.set_wallpaper(Path::new("/tmp/a.jpg")).await.is_err());
    }

    #[tokio::test]
    async fn missing_program_is_error() {
        let cmd = CommandSetter::new("definitely-not-a-wallpaper-tool-xyz", vec![]);
        assert!(cmd.set_wallpaper(Path::new("/tmp/a.jpg")).await.is_err());
    }
}

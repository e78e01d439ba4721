use crate::cli::Command;
use anyhow::bail;
use crosswind_runner::prelude::start;
use crosswind_summariser::generate_chart;

/// Run a command and return the line telling the user where its output was written.
pub async fn execute(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Start(args) => {
            let results_path = start(args.into()).await?;
            Ok(format!("Full raw data saved to: {}", results_path.display()))
        }
        Command::Visualize { file } => {
            if !file.exists() {
                bail!("Results file not found: {}", file.display());
            }

            let chart_path = generate_chart(&file)?;
            Ok(format!("Chart saved to: {}", chart_path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::StartArgs;
    use pretty_assertions::assert_eq;

    fn start_command(dir: &std::path::Path, definition: &str) -> Command {
        let config = dir.join("benchmarks.json");
        std::fs::write(&config, definition).unwrap();

        Command::Start(StartArgs {
            config,
            system: None,
            output_dir: Some(dir.join("outputs")),
            no_progress: true,
        })
    }

    #[tokio::test]
    async fn start_reports_where_results_were_saved() {
        let dir = tempfile::tempdir().unwrap();
        let command = start_command(
            dir.path(),
            r#"{"config": {"iterations": 1, "timeout_seconds": 1}, "systems": {}, "scenarios": []}"#,
        );

        let line = execute(command).await.unwrap();

        let results_path = dir.path().join("outputs").join("no_systems").join("results.json");
        assert_eq!(
            line,
            format!("Full raw data saved to: {}", results_path.display())
        );
        assert!(results_path.exists());
    }

    #[tokio::test]
    async fn start_fails_for_missing_definition() {
        let dir = tempfile::tempdir().unwrap();
        let command = Command::Start(StartArgs {
            config: dir.path().join("missing.json"),
            system: None,
            output_dir: Some(dir.path().join("outputs")),
            no_progress: true,
        });

        assert!(execute(command).await.is_err());
    }

    #[tokio::test]
    async fn visualize_reports_chart_path() {
        let dir = tempfile::tempdir().unwrap();
        let results_path = dir.path().join("results.json");
        std::fs::write(&results_path, r#"{"health": {"fastapi": "SKIPPED"}}"#).unwrap();

        let line = execute(Command::Visualize { file: results_path })
            .await
            .unwrap();

        assert_eq!(
            line,
            format!("Chart saved to: {}", dir.path().join("results.html").display())
        );
    }

    #[tokio::test]
    async fn visualize_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = execute(Command::Visualize {
            file: dir.path().join("results.json"),
        })
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Results file not found"));
    }
}

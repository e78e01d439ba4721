use crosswind_runner::prelude::{start, StartOptions};
use crosswind_summary_model::{load_results, SystemOutcome};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_definition(dir: &Path, fast: &str, slow: &str) -> std::path::PathBuf {
    let definition = serde_json::json!({
        "config": {"iterations": 5, "timeout_seconds": 2, "remove_outliers": true},
        "systems": {"fast": fast, "slow": slow},
        "scenarios": [
            {"name": "users", "endpoints": {"fast": "/users", "slow": "/users"}},
            {"name": "broken", "endpoints": {"fast": "/broken", "slow": ""}}
        ]
    });

    let definition_path = dir.join("benchmarks.json");
    std::fs::write(&definition_path, definition.to_string()).unwrap();
    definition_path
}

async fn mock_system(delay_ms: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(std::time::Duration::from_millis(delay_ms)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn start_measures_stores_and_archives() {
    let fast = mock_system(0).await;
    let slow = mock_system(200).await;

    let work_dir = tempfile::tempdir().unwrap();
    let definition_path = write_definition(work_dir.path(), &fast.uri(), &slow.uri());
    let output_dir = work_dir.path().join("outputs");

    let mut options = StartOptions::new(&definition_path);
    options.output_dir = Some(output_dir.clone());
    options.no_progress = true;

    let results_path = start(options.clone()).await.unwrap();
    assert_eq!(results_path, output_dir.join("fast_vs_slow").join("results.json"));

    let results = load_results(&results_path).unwrap();
    assert_eq!(results.keys().collect::<Vec<_>>(), vec!["users", "broken"]);

    let fast_users = results["users"]["fast"].stats().unwrap();
    let slow_users = results["users"]["slow"].stats().unwrap();
    assert!(fast_users.mean < slow_users.mean);
    assert!(fast_users.is_winner);
    assert!(!slow_users.is_winner);

    assert_eq!(
        results["broken"]["fast"],
        SystemOutcome::Failed {
            error: "HTTP 500".to_string()
        }
    );
    assert_eq!(results["broken"]["slow"], SystemOutcome::Skipped);

    // A second run moves the first results into the archive.
    let first_run = std::fs::read_to_string(&results_path).unwrap();
    start(options).await.unwrap();

    let archived = std::fs::read_dir(output_dir.join("fast_vs_slow").join("archive"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(archived.len(), 1);
    assert_eq!(std::fs::read_to_string(&archived[0]).unwrap(), first_run);
}

#[tokio::test]
async fn start_fails_for_missing_definition() {
    let work_dir = tempfile::tempdir().unwrap();
    let mut options = StartOptions::new(work_dir.path().join("missing.json"));
    options.output_dir = Some(work_dir.path().join("outputs"));
    options.no_progress = true;

    let err = start(options).await.unwrap_err();
    assert!(err.to_string().contains("missing.json"), "{err}");
    assert!(!work_dir.path().join("outputs").exists());
}

#[tokio::test]
async fn start_fails_for_malformed_definition() {
    let work_dir = tempfile::tempdir().unwrap();
    let definition_path = work_dir.path().join("benchmarks.json");
    std::fs::write(&definition_path, "{ not json").unwrap();

    let mut options = StartOptions::new(&definition_path);
    options.output_dir = Some(work_dir.path().join("outputs"));
    options.no_progress = true;

    assert!(start(options).await.is_err());
}

use catch_report::domain::ports::Pipeline;
use catch_report::utils::error::ErrorSeverity;
use catch_report::{AppConfig, CatchPipeline, LocalStorage, ReportEngine};
use chrono::NaiveDate;
use httpmock::prelude::*;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

const BLOG: &str = r#"
<html><body>
  <article><h2>10/15 須磨海釣り公園</h2><p>アジ20匹、サイズ18cmをサビキで確認しました。</p></article>
  <article><h2>10/14 六甲アイランド</h2><p>タチウオ 90cm 3本 ワインドで好調です。</p></article>
</body></html>
"#;

const ANGLERS_LISTING: &str = r#"
<html><body>
  <div class="catch-card"><a href="/catches/1">10/15 明石港の釣果</a></div>
</body></html>
"#;

const ANGLERS_DETAIL: &str = r#"
<html><body>
  <div class="user-name">明石の釣り人</div>
  <div class="catch-detail">タコ 2杯 タコエギで。潮が効いていました。</div>
</body></html>
"#;

const POINT_BOARD: &str = r#"
<html><body><table>
  <tr><th>日付</th><th>場所</th><th>釣果</th></tr>
  <tr><td>10/15</td><td>南芦屋浜</td><td>チヌ 45cm 1枚 フカセ</td></tr>
</table></body></html>
"#;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn base_config(output: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.report.output_dir = output.to_string_lossy().to_string();
    config.http.politeness_delay_ms = 0;
    config.http.min_body_length = 20;
    config
}

fn point_sources_at(config: &mut AppConfig, server: &MockServer) {
    config.sources.fishingmax.urls = vec![server.url("/blog")];
    config.sources.anglers.urls = vec![server.url("/anglers")];
    config.sources.point.urls = vec![server.url("/point")];
}

fn engine(config: AppConfig) -> ReportEngine<CatchPipeline<LocalStorage>> {
    let storage = LocalStorage::new(config.output_dir());
    let pipeline = CatchPipeline::new(storage, config).unwrap().with_date(as_of());
    ReportEngine::new(pipeline)
}

fn read_json(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read(dir.join("fishing-data.json")).unwrap();
    serde_json::from_slice(&raw).unwrap()
}

fn spot<'a>(report: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    report["spots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["id"] == id)
        .unwrap()
}

#[tokio::test]
async fn test_end_to_end_report_from_all_sources() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;

    let blog = server
        .mock_async(|when, then| {
            when.method(GET).path("/blog");
            then.status(200)
                .header("Content-Type", "text/html; charset=utf-8")
                .body(BLOG);
        })
        .await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET).path("/anglers");
            then.status(200).body(ANGLERS_LISTING);
        })
        .await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/catches/1");
            then.status(200).body(ANGLERS_DETAIL);
        })
        .await;
    let board = server
        .mock_async(|when, then| {
            when.method(GET).path("/point");
            then.status(200).body(POINT_BOARD);
        })
        .await;

    let mut config = base_config(temp_dir.path());
    point_sources_at(&mut config, &server);

    let location = tokio_test::assert_ok!(engine(config).run().await);
    assert!(location.ends_with("fishing-data.json"));

    blog.assert_async().await;
    listing.assert_async().await;
    detail.assert_async().await;
    board.assert_async().await;

    for file in ["fishing-data.json", "index.html", "history.csv"] {
        assert!(temp_dir.path().join(file).exists(), "{} should be written", file);
    }

    let report = read_json(temp_dir.path());
    assert_eq!(report["dateLabel"], "2026年10月16日(金)");

    let suma = spot(&report, "須磨海釣り公園");
    assert_eq!(suma["liveCount"], 1);
    assert_eq!(suma["catches"][0]["species"], "アジ");
    assert_eq!(suma["catches"][0]["countDescription"], "20匹");
    assert_eq!(suma["catches"][0]["sourceTag"], "fishingmax");

    let rokko = spot(&report, "六甲アイランド");
    assert_eq!(rokko["catches"][0]["species"], "タチウオ");
    assert_eq!(rokko["catches"][0]["sizeDescription"], "90cm");

    let akashi = spot(&report, "明石港");
    assert_eq!(akashi["catches"][0]["species"], "タコ");
    assert_eq!(akashi["catches"][0]["reporterLabel"], "明石の釣り人");
    assert_eq!(akashi["catches"][0]["method"], "タコエギ");

    let ashiya = spot(&report, "南芦屋浜");
    assert_eq!(ashiya["catches"][0]["species"], "チヌ");
    assert_eq!(ashiya["catches"][0]["sourceTag"], "point");

    let html = std::fs::read_to_string(temp_dir.path().join("index.html"))?;
    assert!(html.contains("須磨海釣り公園"));
    assert!(html.contains("明日のおすすめ"));

    Ok(())
}

#[tokio::test]
async fn test_total_source_failure_falls_back_to_seasonal() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let down = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500).body("internal server error, please retry later");
        })
        .await;

    let mut config = base_config(temp_dir.path());
    point_sources_at(&mut config, &server);

    engine(config).run().await?;

    down.assert_hits_async(3).await;

    let report = read_json(temp_dir.path());
    let spots = report["spots"].as_array().unwrap();
    assert_eq!(spots.len(), 12);
    for spot in spots {
        assert_eq!(spot["liveCount"], 0);
        assert!(!spot["catches"].as_array().unwrap().is_empty());
        assert!(spot["catches"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["sourceTag"] == "seasonal"));
    }

    let sources = report["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 3);
    assert!(sources.iter().all(|s| s["records"] == 0));
    assert!(sources
        .iter()
        .all(|s| !s["diagnostics"].as_array().unwrap().is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_offline_mode_makes_no_requests() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body(BLOG);
        })
        .await;

    let mut config = base_config(temp_dir.path());
    point_sources_at(&mut config, &server);
    config.report.offline = true;

    engine(config).run().await?;

    any.assert_hits_async(0).await;
    let report = read_json(temp_dir.path());
    assert!(report["sources"].as_array().unwrap().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_slow_source_times_out_without_failing_the_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/blog");
            then.status(200).body(BLOG).delay(Duration::from_secs(3));
        })
        .await;

    let mut config = base_config(temp_dir.path());
    config.http.timeout_seconds = 1;
    config.sources.fishingmax.urls = vec![server.url("/blog")];
    config.sources.anglers.enabled = false;
    config.sources.point.enabled = false;

    let storage = LocalStorage::new(config.output_dir());
    let pipeline = CatchPipeline::new(storage, config)?.with_date(as_of());

    let outcomes = pipeline.extract().await?;
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].records.is_empty());
    assert!(outcomes[0].diagnostics[0].contains("timed out"));

    let report = pipeline.transform(outcomes).await?;
    assert_eq!(report.live_catches(), 0);
    assert!(report.total_catches() > 0);

    Ok(())
}

#[tokio::test]
async fn test_unwritable_output_directory_is_an_error() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let blocker = temp_dir.path().join("not-a-directory");
    std::fs::write(&blocker, b"occupied")?;

    let mut config = base_config(&blocker);
    config.report.offline = true;

    let err = engine(config).run().await.unwrap_err();
    assert_eq!(err.severity(), ErrorSeverity::Critical);

    Ok(())
}

#[test]
fn test_config_file_with_env_substitution() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("catch-report.toml");
    std::env::set_var("CATCH_REPORT_TEST_OUTPUT", "/tmp/kobe-site");
    std::fs::write(
        &path,
        r#"
[report]
output_dir = "${CATCH_REPORT_TEST_OUTPUT}"
recommendation_count = 5

[http]
timeout_seconds = 20

[sources.anglers]
enabled = false
"#,
    )?;

    let config = AppConfig::from_file(&path)?;
    catch_report::utils::validation::Validate::validate(&config)?;

    assert_eq!(config.output_dir(), "/tmp/kobe-site");
    assert_eq!(config.report.recommendation_count, 5);
    assert_eq!(config.http.timeout_seconds, 20);
    assert!(!config.sources.anglers.enabled);
    assert!(config.sources.point.enabled);
    assert_eq!(config.locations.len(), 12);

    Ok(())
}

//! Integration tests for the crawler
//!
//! These tests use wiremock to serve ranking pages and run the full
//! fetch -> extract -> persist cycle end-to-end.

use mv_scout::config::{validate, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use mv_scout::crawler::crawl;
use mv_scout::output::{read_dataset, Dataset};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn create_test_config(server: &MockServer, last_page: u32, output: &Path) -> Config {
    Config {
        crawler: CrawlerConfig {
            base_url: format!("{}/ranking?page=", server.uri()),
            first_page: 1,
            last_page,
            max_concurrent_pages: 1,
            request_timeout_secs: 5,
            max_retries: 0,
            retry_delay_ms: 10,
        },
        user_agent: UserAgentConfig {
            value: "Mozilla/5.0 (X11; Linux x86_64) TestBot/1.0".to_string(),
        },
        output: OutputConfig {
            path: output.display().to_string(),
        },
        ..Config::default()
    }
}

/// One ranked player's row-group, in the ranking table's markup
fn player_row(name: &str, value: &str) -> String {
    let slug = name.to_lowercase().replace(' ', "-");
    format!(
        r#"<tr class="odd">
<td><table class="inline-table">
  <tr><td rowspan="2"><a href="/profil/{slug}"><img src="https://img.example.com/{slug}.jpg" title="{name}"></a></td>
      <td class="hauptlink"><a href="/profil/{slug}">{name}</a></td></tr>
  <tr><td>Attacking Midfield</td></tr>
</table></td>
<td class="zentriert">21</td>
<td class="zentriert"><img src="https://img.example.com/flags/40.png" title="Germany"><img src="https://img.example.com/flags/189.png" title="England"></td>
<td class="zentriert"><a href="/verein/27"><img src="https://img.example.com/clubs/27.png" title="Bayern Munich"></a></td>
<td class="rechts hauptlink">{value}</td>
<td>33</td><td>12</td><td>0</td><td>10</td><td>2</td><td>0</td><td>0</td><td>4</td><td>15</td>
</tr>"#,
        slug = slug,
        name = name,
        value = value,
    )
}

/// A ranking page holding the given players
fn ranking_page(players: &[(&str, &str)]) -> String {
    let rows: String = players
        .iter()
        .map(|(name, value)| player_row(name, value))
        .collect();
    format!(
        r#"<html><body><div id="wertvollstespieler"><div><div><div class="responsive-table">
<div class="galerie-box"><div><img src="https://img.example.com/gallery/top.jpg"></div></div>
<div id="yw1"><table class="items"><thead><tr><th>#</th></tr></thead><tbody>
{}
</tbody></table></div>
</div></div></div></div></body></html>"#,
        rows
    )
}

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/ranking"))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn page_response(players: &[(&str, &str)]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(ranking_page(players))
}

#[tokio::test]
async fn test_full_crawl_writes_dataset() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    mount_page(
        &server,
        1,
        page_response(&[("Jamal Musiala", "€140.00m"), ("Florian Wirtz", "€130.00m")]),
    )
    .await;
    mount_page(&server, 2, page_response(&[("Harry Kane", "€90.00m")])).await;

    let config = create_test_config(&server, 2, &output);
    validate(&config).unwrap();

    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.pages_total, 2);
    assert_eq!(report.pages_succeeded, 2);
    assert!(report.failures.is_empty());
    assert!(!report.cancelled);

    let records = read_dataset(&output).unwrap();
    assert_eq!(records, report.records);

    let names: Vec<&str> = records.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(names, vec!["Jamal Musiala", "Florian Wirtz", "Harry Kane"]);

    let musiala = &records[0];
    assert_eq!(musiala.market_value, Some(140_000_000));
    assert_eq!(musiala.position, "Attacking Midfield");
    assert_eq!(musiala.age, 21);
    assert_eq!(musiala.club, "Bayern Munich");
    assert_eq!(musiala.nationalities.len(), 2);
    assert_eq!(musiala.primary_nationality().unwrap().name, "Germany");
    assert_eq!(musiala.gallery_url, "https://img.example.com/gallery/top.jpg");
    assert_eq!(musiala.matches, 33);
    assert_eq!(musiala.substitution_off, 15);
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    mount_page(&server, 1, page_response(&[("Bukayo Saka", "€140.00m")])).await;
    mount_page(&server, 2, ResponseTemplate::new(500)).await;
    mount_page(&server, 3, page_response(&[("Declan Rice", "€120.00m")])).await;

    let config = create_test_config(&server, 3, &output);
    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.pages_succeeded, 2);
    assert_eq!(report.failed_pages(), vec![2]);

    let dataset = Dataset::load(&output).unwrap();
    assert_eq!(dataset.player_names(), vec!["Bukayo Saka", "Declan Rice"]);
}

#[tokio::test]
async fn test_unparsable_page_is_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_string("<html><body>Maintenance</body></html>"),
    )
    .await;
    mount_page(&server, 2, page_response(&[("Phil Foden", "€110.00m")])).await;

    let config = create_test_config(&server, 2, &output);
    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.failed_pages(), vec![1]);
    assert_eq!(read_dataset(&output).unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_crawl_preserves_page_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    // Page 1 finishes last
    mount_page(
        &server,
        1,
        page_response(&[("Pedri", "€100.00m")]).set_delay(Duration::from_millis(300)),
    )
    .await;
    mount_page(&server, 2, page_response(&[("Gavi", "€90.00m")])).await;
    mount_page(&server, 3, page_response(&[("Lamine Yamal", "€120.00m")])).await;

    let mut config = create_test_config(&server, 3, &output);
    config.crawler.max_concurrent_pages = 3;

    let report = crawl(&config, std::future::pending()).await.unwrap();
    assert_eq!(report.pages_succeeded, 3);

    let dataset = Dataset::load(&output).unwrap();
    assert_eq!(dataset.player_names(), vec!["Pedri", "Gavi", "Lamine Yamal"]);
}

#[tokio::test]
async fn test_transient_failure_retried() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    // First request is throttled, the retry succeeds
    Mock::given(method("GET"))
        .and(path("/ranking"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, 1, page_response(&[("Rodri", "€110.00m")])).await;

    let mut config = create_test_config(&server, 1, &output);
    config.crawler.max_retries = 2;

    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.pages_succeeded, 1);
    assert_eq!(read_dataset(&output).unwrap()[0].player, "Rodri");
}

#[tokio::test]
async fn test_unparsable_market_value_kept_as_null() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    mount_page(&server, 1, page_response(&[("Unknown Talent", "-")])).await;

    let config = create_test_config(&server, 1, &output);
    crawl(&config, std::future::pending()).await.unwrap();

    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("\"market_value\": null"));
    assert_eq!(read_dataset(&output).unwrap()[0].market_value, None);
}

#[tokio::test]
async fn test_image_without_src_keeps_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    let body = ranking_page(&[("Leroy Sane", "€50.00m")])
        .replace(r#"src="https://img.example.com/clubs/27.png" "#, "");
    mount_page(&server, 1, ResponseTemplate::new(200).set_body_string(body)).await;

    let config = create_test_config(&server, 1, &output);
    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.pages_succeeded, 1);
    let records = read_dataset(&output).unwrap();
    assert_eq!(records[0].club, "Bayern Munich");
    assert_eq!(records[0].club_image_url, "");
}

#[tokio::test]
async fn test_stopped_crawl_still_writes_dataset() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    mount_page(&server, 1, page_response(&[("Vinicius Junior", "€200.00m")])).await;

    let config = create_test_config(&server, 1, &output);
    let report = crawl(&config, async {}).await.unwrap();

    assert!(report.cancelled);
    assert!(report.records.is_empty());
    assert!(read_dataset(&output).unwrap().is_empty());
}

#[tokio::test]
async fn test_all_pages_failing_writes_empty_dataset() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("player_data.json");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = create_test_config(&server, 3, &output);
    let report = crawl(&config, std::future::pending()).await.unwrap();

    assert_eq!(report.failed_pages(), vec![1, 2, 3]);
    assert_eq!(report.success_rate(), 0.0);
    assert!(read_dataset(&output).unwrap().is_empty());
}

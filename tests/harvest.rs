use item_scraper::config::Config;
use item_scraper::harvest::{
    check_coverage, HarvestOutcome, Harvester, IconCandidate, IconSource, PageIconSource,
    ProbeIconSource,
};
use item_scraper::utils::http::create_client;
use pretty_assertions::assert_eq;
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

async fn mount_png(server: &MockServer, at: &str) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn page_source_downloads_linked_icons() {
    let server = MockServer::start().await;
    let page = r#"
        <html><body>
          <img src="/cdn/items/power_rod.png" alt="Power Rod">
          <img src="/cdn/items/wires.png" alt="Wires">
          <img src="/static/logo.png" alt="Logo">
        </body></html>
    "#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;
    mount_png(&server, "/cdn/items/power_rod.png").await;

    let client = create_client(&Config::default()).unwrap();
    let source = PageIconSource::new(format!("{}/", server.uri()), "/cdn/items/", 1);
    let candidates = source.resolve(&client).await.unwrap();
    assert_eq!(candidates.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let report = Harvester::new(client, dir.path(), 1).run(&candidates).await;

    assert_eq!(report.downloaded, vec!["power_rod.png"]);
    assert_eq!(report.failed, vec!["wires"]);
    assert_eq!(fs::read(dir.path().join("power_rod.png")).unwrap(), PNG);
    assert!(!dir.path().join("logo.png").exists());
}

#[tokio::test]
async fn probe_source_tries_patterns_in_order() {
    let server = MockServer::start().await;
    mount_png(&server, "/images/items/lemon.webp").await;

    let patterns = vec![
        format!("{}/items/{{}}.png", server.uri()),
        format!("{}/images/items/{{}}.webp", server.uri()),
    ];
    let source = ProbeIconSource::from_names(["Lemon"], patterns);
    let client = create_client(&Config::default()).unwrap();
    let candidates = source.resolve(&client).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let harvester = Harvester::new(client, dir.path(), 1);
    let outcome = harvester.harvest_one(&candidates[0]).await;

    assert_eq!(
        outcome,
        HarvestOutcome::Downloaded {
            url: format!("{}/images/items/lemon.webp", server.uri())
        }
    );
    assert!(dir.path().join("lemon.png").is_file());
}

#[tokio::test]
async fn second_run_skips_existing_icons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apricot.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(PNG.to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let candidate = IconCandidate {
        key: "apricot".to_string(),
        file_name: "apricot.png".to_string(),
        urls: vec![format!("{}/apricot.png", server.uri())],
    };
    let dir = tempfile::tempdir().unwrap();
    let client = create_client(&Config::default()).unwrap();
    let harvester = Harvester::new(client, dir.path().join("public").join("items"), 1);

    let first = harvester.run(std::slice::from_ref(&candidate)).await;
    let second = harvester.run(std::slice::from_ref(&candidate)).await;

    assert_eq!(first.downloaded, vec!["apricot.png"]);
    assert_eq!(second.skipped, vec!["apricot.png"]);
    assert_eq!(second.succeeded(), 1);
}

#[tokio::test]
async fn coverage_reflects_harvested_icons() {
    let server = MockServer::start().await;
    mount_png(&server, "/items/power_rod.png").await;

    let source = ProbeIconSource::from_names(
        ["Power Rod", "Dog's Collar"],
        vec![format!("{}/items/{{}}.png", server.uri())],
    );
    let dir = tempfile::tempdir().unwrap();
    let client = create_client(&Config::default()).unwrap();
    Harvester::new(client, dir.path(), 1)
        .run(&source.candidates())
        .await;

    let report = check_coverage(["Power Rod", "Dog's Collar"], dir.path());
    assert_eq!(report.matched, vec!["Power Rod"]);
    assert_eq!(report.unmatched[0].expected_file, "dogs_collar.png");
}

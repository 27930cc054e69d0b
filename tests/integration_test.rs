use std::sync::Arc;
use url::Url;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};
use link_ranker::crawler::{self, CrawlerConfig};
use link_ranker::link_graph::{NORMALIZED_RANK_MAX, RankConfig};
use link_ranker::report;

async fn mount_page(server: &MockServer, page: &str, links: &[&str]) {
    let body: String = links
        .iter()
        .map(|l| format!(r#"<a href="{}">{}</a>"#, l, l))
        .collect();
    Mock::given(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// root -> a, root -> b, a -> b, b -> root
#[tokio::test]
async fn test_crawl_and_rank_small_site() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/a", &["/b"]).await;
    mount_page(&server, "/b", &["/"]).await;

    let root = Url::parse(&server.uri())?;
    let config = Arc::new(
        CrawlerConfig::new(root.clone())
            .with_max_urls(10)
            .with_max_depth(5)
            .with_thread_count(2)
            .with_request_delay(0),
    );
    let state = Arc::new(crawler::CrawlerState::new(&config));

    crawler::crawl(state.clone(), config).await?;
    let graph = crawler::build_graph_from_state(&state, RankConfig::default()).await?;

    let a = root.join("/a")?.to_string();
    let b = root.join("/b")?.to_string();
    let root = root.to_string();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.get_outgoing_links(&root)?.len(), 2);
    let b_parents = graph.get_incoming_links(&b)?;
    assert!(b_parents.contains(&root) && b_parents.contains(&a));
    assert_eq!(graph.get_incoming_links(&root)?, &[b.clone()]);

    let ranks = graph.get_all_ranks();
    assert!(ranks.values().all(|r| r.raw > 0.0));
    assert!(ranks.values().any(|r| r.normalized == NORMALIZED_RANK_MAX));
    // a page linked from two places beats one linked from half of a single page
    assert!(ranks[&b].raw > ranks[&a].raw);

    let entries = report::sorted_ranks(&ranks);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].normalized_rank, NORMALIZED_RANK_MAX);
    assert_ne!(entries[0].url, a);
    Ok(())
}

#[tokio::test]
async fn test_ranks_export_matches_report() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/x"]).await;
    mount_page(&server, "/x", &[]).await;

    let root = Url::parse(&server.uri())?;
    let config = Arc::new(
        CrawlerConfig::new(root.clone())
            .with_thread_count(1)
            .with_request_delay(0),
    );
    let state = Arc::new(crawler::CrawlerState::new(&config));
    crawler::crawl(state.clone(), config).await?;
    let graph = crawler::build_graph_from_state(&state, RankConfig::default()).await?;

    let entries = report::sorted_ranks(&graph.get_all_ranks());
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("ranks.json");
    report::write_ranks_json(&file, &entries)?;

    let written: Vec<serde_json::Value> = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
    assert_eq!(written.len(), 2);
    assert!(written[0]["url"].as_str().unwrap().ends_with("/x"));
    assert_eq!(written[0]["normalized_rank"], 10.0);
    Ok(())
}

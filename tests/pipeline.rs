//! End-to-end pipeline tests over a mock API: fabricated cities with known
//! topics and support counts produce hand-computed percentage mappings.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use civicpulse::aggregate::{pivot, ZeroTotalSupport};
use civicpulse::api::{IdeaDetail, IdeaSummary, IdeasApi};
use civicpulse::city::City;
use civicpulse::config::Config;
use civicpulse::pipeline::{city_topic_percentages, cohort_percentages, discover_idea_ids};

const EPS: f64 = 1e-9;

#[derive(Default)]
struct MockApi {
    pages: HashMap<(String, u32), Vec<String>>,
    details: HashMap<String, IdeaDetail>,
}

impl MockApi {
    fn page(mut self, slug: &str, page: u32, ids: &[&str]) -> Self {
        self.pages.insert(
            (slug.to_string(), page),
            ids.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    fn idea(mut self, id: &str, topics: &[&str], support_count: Option<u64>) -> Self {
        self.details.insert(
            id.to_string(),
            IdeaDetail {
                id: id.to_string(),
                topics: topics.iter().map(|s| s.to_string()).collect(),
                support_count,
            },
        );
        self
    }
}

#[async_trait]
impl IdeasApi for MockApi {
    async fn fetch_ideas_page(&self, slug: &str, page: u32) -> Result<Vec<IdeaSummary>> {
        let ids = self
            .pages
            .get(&(slug.to_string(), page))
            .cloned()
            .unwrap_or_default();
        Ok(ids.into_iter().map(|id| IdeaSummary { id }).collect())
    }

    async fn fetch_idea(&self, id: &str) -> Result<IdeaDetail> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("no such idea: {}", id))
    }
}

fn test_config() -> Config {
    Config {
        max_pages: 3,
        fetch_concurrency: 2,
        ..Config::default()
    }
}

fn two_city_fixture() -> MockApi {
    MockApi::default()
        // New Orleans: bikes 40, transit 10 -> 80% / 20%
        .page("nola", 0, &["nola-1", "sf-99"])
        .page("nola", 1, &["nola-1", "nola-2"])
        .idea("nola-1", &["bikes", "transit"], Some(10))
        .idea("nola-2", &["bikes"], Some(30))
        // Detroit: transit 5, food 15 -> 25% / 75%
        .page("det", 0, &["det-1", "det-2"])
        .idea("det-1", &["transit"], Some(5))
        .idea("det-2", &["food"], Some(15))
}

#[tokio::test]
async fn discovery_filters_prefix_and_collapses_duplicates() {
    let api = two_city_fixture();
    let cfg = test_config();
    let ids = discover_idea_ids(&api, &cfg, "nola").await.unwrap();
    let expected: Vec<&str> = vec!["nola-1", "nola-2"];
    assert_eq!(ids.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn discovery_stops_at_first_empty_page() {
    let api = MockApi::default()
        .page("stl", 0, &["stl-1"])
        // page 1 is absent (empty); page 2 must never be reached
        .page("stl", 2, &["stl-2"]);
    let cfg = test_config();
    let ids = discover_idea_ids(&api, &cfg, "stl").await.unwrap();
    assert_eq!(ids.len(), 1);
    assert!(ids.contains("stl-1"));
}

#[tokio::test]
async fn discovery_respects_page_cap() {
    let api = MockApi::default()
        .page("bos", 0, &["bos-1"])
        .page("bos", 1, &["bos-2"])
        .page("bos", 2, &["bos-3"])
        .page("bos", 3, &["bos-4"]);
    let cfg = test_config();
    let ids = discover_idea_ids(&api, &cfg, "bos").await.unwrap();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains("bos-4"));
}

#[tokio::test]
async fn city_pipeline_matches_hand_computed_percentages() {
    let api = two_city_fixture();
    let cfg = test_config();
    let nola = City::by_name("New Orleans").unwrap();
    let pct = city_topic_percentages(&api, &cfg, nola).await.unwrap();
    assert_eq!(pct.len(), 2);
    assert!((pct["bikes"] - 80.0).abs() < EPS);
    assert!((pct["transit"] - 20.0).abs() < EPS);
}

#[tokio::test]
async fn cohort_totals_are_order_independent() {
    let api = two_city_fixture();
    let cfg = test_config();
    let nola = City::by_name("New Orleans").unwrap();
    let det = City::by_name("Detroit").unwrap();

    let forward = cohort_percentages(&api, &cfg, &[nola, det]).await.unwrap();
    let reverse = cohort_percentages(&api, &cfg, &[det, nola]).await.unwrap();

    assert!((forward["bikes"] - 80.0).abs() < EPS);
    assert!((forward["transit"] - 45.0).abs() < EPS);
    assert!((forward["food"] - 75.0).abs() < EPS);
    assert_eq!(forward.len(), reverse.len());
    for (topic, value) in &forward {
        assert!((value - reverse[topic]).abs() < EPS);
    }
}

#[tokio::test]
async fn city_with_no_support_fails_with_named_error() {
    let api = MockApi::default()
        .page("miami", 0, &["miami-1"])
        .idea("miami-1", &["art"], None);
    let cfg = test_config();
    let miami = City::by_name("Miami").unwrap();
    let err = city_topic_percentages(&api, &cfg, miami).await.unwrap_err();
    assert!(err.downcast_ref::<ZeroTotalSupport>().is_some());
}

#[tokio::test]
async fn pivoted_cohorts_keep_absent_pairs_absent() {
    let api = two_city_fixture();
    let cfg = test_config();
    let nola = City::by_name("New Orleans").unwrap();
    let det = City::by_name("Detroit").unwrap();

    let mut by_cohort = HashMap::new();
    by_cohort.insert(
        "High Poverty".to_string(),
        cohort_percentages(&api, &cfg, &[nola]).await.unwrap(),
    );
    by_cohort.insert(
        "Low Poverty".to_string(),
        cohort_percentages(&api, &cfg, &[det]).await.unwrap(),
    );

    let by_topic = pivot(&by_cohort);
    assert!((by_topic["bikes"]["High Poverty"] - 80.0).abs() < EPS);
    assert!((by_topic["transit"]["High Poverty"] - 20.0).abs() < EPS);
    assert!((by_topic["transit"]["Low Poverty"] - 25.0).abs() < EPS);
    assert!((by_topic["food"]["Low Poverty"] - 75.0).abs() < EPS);
    assert!(!by_topic["bikes"].contains_key("Low Poverty"));
    assert!(!by_topic["food"].contains_key("High Poverty"));
}

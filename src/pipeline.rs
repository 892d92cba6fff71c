use std::collections::{BTreeSet, HashMap};

use anyhow::Result;
use futures_util::{stream, StreamExt};

use crate::aggregate::{accumulate_support, add_into, convert_to_percentages};
use crate::api::IdeasApi;
use crate::city::City;
use crate::config::Config;
use crate::logging::{json_log, log, obj, v_num, v_str, Level};
use crate::topics::Idea;

/// Walk listing pages for one city until the first empty page or the page
/// cap, keeping ids prefixed with `"{slug}-"`. Duplicates across pages
/// collapse into the set.
pub async fn discover_idea_ids(
    api: &dyn IdeasApi,
    cfg: &Config,
    slug: &str,
) -> Result<BTreeSet<String>> {
    let prefix = format!("{}-", slug);
    let mut ids = BTreeSet::new();
    for page in 0..cfg.max_pages {
        let summaries = api.fetch_ideas_page(slug, page).await?;
        if summaries.is_empty() {
            break;
        }
        let before = ids.len();
        ids.extend(
            summaries
                .into_iter()
                .map(|s| s.id)
                .filter(|id| id.starts_with(&prefix)),
        );
        json_log(
            "fetch",
            obj(&[
                ("slug", v_str(slug)),
                ("page", v_num(page as f64)),
                ("new_ids", v_num((ids.len() - before) as f64)),
            ]),
        );
    }
    Ok(ids)
}

/// Fetch each idea's detail once, through a bounded pool. Completion order
/// is irrelevant downstream since aggregation is a commutative sum.
pub async fn fetch_ideas(
    api: &dyn IdeasApi,
    cfg: &Config,
    ids: &BTreeSet<String>,
) -> Result<Vec<Idea>> {
    let details = stream::iter(ids.iter().cloned())
        .map(|id| async move { api.fetch_idea(&id).await })
        .buffer_unordered(cfg.fetch_concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    let mut ideas = Vec::with_capacity(details.len());
    for detail in details {
        let detail = detail?;
        if detail.support_count.is_none() {
            log(
                Level::Warn,
                "extract",
                obj(&[
                    ("id", v_str(&detail.id)),
                    ("msg", v_str("support_count missing; defaulting to 0")),
                ]),
            );
        }
        ideas.push(Idea::from_detail(detail));
    }
    Ok(ideas)
}

/// Full per-city pipeline: discover ids, fetch details, accumulate support
/// per topic, normalize to percentages of the city total.
pub async fn city_topic_percentages(
    api: &dyn IdeasApi,
    cfg: &Config,
    city: &City,
) -> Result<HashMap<String, f64>> {
    let ids = discover_idea_ids(api, cfg, city.slug).await?;
    let ideas = fetch_ideas(api, cfg, &ids).await?;
    let counts = accumulate_support(&ideas);
    json_log(
        "aggregate",
        obj(&[
            ("city", v_str(city.name)),
            ("ideas", v_num(ideas.len() as f64)),
            ("topics", v_num(counts.len() as f64)),
        ]),
    );
    convert_to_percentages(&counts)
}

/// Sum per-city percentages per topic across a set of cities. Not
/// re-normalized: values can exceed 100 and are only comparable to other
/// cohort aggregates built the same way.
pub async fn cohort_percentages(
    api: &dyn IdeasApi,
    cfg: &Config,
    cities: &[&City],
) -> Result<HashMap<String, f64>> {
    let mut totals = HashMap::new();
    for city in cities {
        let percentages = city_topic_percentages(api, cfg, city).await?;
        add_into(&mut totals, &percentages);
    }
    Ok(totals)
}

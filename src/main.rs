use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use civicpulse::aggregate::pivot;
use civicpulse::api::HttpIdeasApi;
use civicpulse::chart;
use civicpulse::city::{cohort_cities, City, Cohort};
use civicpulse::config::Config;
use civicpulse::logging::{json_log, obj, v_num, v_str};
use civicpulse::pipeline::{city_topic_percentages, cohort_percentages};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let city = City::by_name(&cfg.city)?;
    let api = HttpIdeasApi::new(&cfg)?;

    json_log(
        "run",
        obj(&[
            ("city", v_str(city.name)),
            ("api_base", v_str(&cfg.api_base)),
            ("max_pages", v_num(cfg.max_pages as f64)),
            ("fetch_concurrency", v_num(cfg.fetch_concurrency as f64)),
        ]),
    );

    let percentages = city_topic_percentages(&api, &cfg, city).await?;
    chart::render_city_chart(Path::new(&cfg.city_chart_path), city.name, &percentages)?;
    json_log(
        "chart",
        obj(&[("view", v_str("city")), ("path", v_str(&cfg.city_chart_path))]),
    );

    let high = cohort_cities(Cohort::HighPoverty);
    let low = cohort_cities(Cohort::LowPoverty);
    let names = |cities: &[&City]| cities.iter().map(|c| c.name).collect::<Vec<_>>().join(", ");
    println!("Cities with a poverty level > 20%: {}", names(&high));
    println!("Cities with a poverty level < 20%: {}", names(&low));

    let mut by_cohort: HashMap<String, HashMap<String, f64>> = HashMap::new();
    by_cohort.insert(
        Cohort::HighPoverty.label().to_string(),
        cohort_percentages(&api, &cfg, &high).await?,
    );
    by_cohort.insert(
        Cohort::LowPoverty.label().to_string(),
        cohort_percentages(&api, &cfg, &low).await?,
    );

    let by_topic = pivot(&by_cohort);
    chart::render_cohort_chart(Path::new(&cfg.cohort_chart_path), &by_topic)?;
    json_log(
        "chart",
        obj(&[("view", v_str("cohort")), ("path", v_str(&cfg.cohort_chart_path))]),
    );

    Ok(())
}

//! Chart rendering over plotters' SVG backend. Layout mirrors the two
//! report views: a per-city horizontal bar chart and a stacked cohort
//! comparison, one vertical bar per topic.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::city::Cohort;

const HIGH_POVERTY_COLOR: RGBColor = RGBColor(0x68, 0xdb, 0x54);
const LOW_POVERTY_COLOR: RGBColor = RGBColor(0x66, 0x66, 0xff);

fn cohort_color(label: &str) -> RGBColor {
    if label == Cohort::HighPoverty.label() {
        HIGH_POVERTY_COLOR
    } else {
        LOW_POVERTY_COLOR
    }
}

/// Topic tag to axis label: title-cased, hyphens replaced with spaces.
pub fn axis_label(topic: &str) -> String {
    topic
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Horizontal bars sorted ascending by percentage, topic names on the
/// y axis.
pub fn render_city_chart(
    path: &Path,
    city: &str,
    percentages: &HashMap<String, f64>,
) -> Result<()> {
    let mut sorted: Vec<(&str, f64)> = percentages.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    let max = sorted.iter().fold(0.0f64, |m, (_, v)| m.max(*v));
    let labels: Vec<String> = sorted.iter().map(|(t, _)| axis_label(t)).collect();

    let root = SVGBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Support by Topic in {}", city), ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(160)
        .build_cartesian_2d(0.0..(max * 1.1).max(1.0), (0..sorted.len()).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(sorted.len().max(1))
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_desc("Percentage of Support")
        .draw()?;

    chart.draw_series(sorted.iter().enumerate().map(|(i, (_, pct))| {
        let mut bar = Rectangle::new(
            [(0.0, SegmentValue::Exact(i)), (*pct, SegmentValue::Exact(i + 1))],
            HIGH_POVERTY_COLOR.filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// One vertical bar per topic with contiguous stacked segments per cohort.
/// A topic missing a cohort simply has no segment for it. Topics are laid
/// out in sorted order so output is deterministic.
pub fn render_cohort_chart(
    path: &Path,
    by_topic: &HashMap<String, HashMap<String, f64>>,
) -> Result<()> {
    let mut topics: Vec<&str> = by_topic.keys().map(|k| k.as_str()).collect();
    topics.sort_unstable();
    let labels: Vec<String> = topics.iter().map(|t| axis_label(t)).collect();

    let cohorts = [Cohort::HighPoverty.label(), Cohort::LowPoverty.label()];
    let max_stack = topics
        .iter()
        .map(|t| by_topic[*t].values().sum::<f64>())
        .fold(0.0f64, f64::max);

    let root = SVGBackend::new(path, (1280, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Support for All Topics in Cities with High Poverty and Low Poverty",
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0..topics.len()).into_segmented(),
            0.0..(max_stack * 1.1).max(1.0),
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(topics.len().max(1))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .y_desc("Percentage of Support")
        .draw()?;

    // One series per cohort, so the legend carries exactly one entry each.
    for (stack_idx, cohort) in cohorts.iter().copied().enumerate() {
        let color = cohort_color(cohort);
        let mut bars = Vec::new();
        for (i, topic) in topics.iter().enumerate() {
            let segments = &by_topic[*topic];
            let value = match segments.get(cohort) {
                Some(v) => *v,
                None => continue,
            };
            // Contiguous stacking: this segment sits on top of whatever
            // earlier cohorts contributed to the same topic.
            let bottom: f64 = cohorts[..stack_idx]
                .iter()
                .filter_map(|c| segments.get(*c))
                .sum();
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), bottom),
                    (SegmentValue::Exact(i + 1), bottom + value),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bars.push(bar);
        }
        chart
            .draw_series(bars)?
            .label(cohort)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

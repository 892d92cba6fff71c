//! civicpulse: one-shot analysis of civic-engagement "idea" records.
//!
//! Pulls paginated idea listings and per-idea details from a city-ideas web
//! API, aggregates support counts by topic tag, normalizes them to per-city
//! percentages, and renders a per-city bar chart plus a stacked comparison
//! of high- vs low-poverty city cohorts.

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod city;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod topics;

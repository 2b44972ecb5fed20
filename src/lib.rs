//! apiduel runs the same natural-language task through two tool-using LLM
//! agents — one with seven narrow REST tools, one with a single
//! `graphql_query` tool carrying the whole schema in its description —
//! against an identical in-memory mock dataset, then reports which approach
//! used fewer tokens, fewer round trips, and less latency.

pub mod agent;
pub mod backend;
pub mod config;
pub mod error;
pub mod llm;
pub mod report;
pub mod tasks;
pub mod tools;

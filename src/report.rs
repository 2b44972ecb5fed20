//! Comparison and report rendering: pure functions of two completed agent
//! runs. The driver only prints what `render_report` returns.

use std::fmt::Write;

use crate::agent::AgentRunResult;

const RULE: &str = "--------------------------------------------------------------------------------";
const DOUBLE_RULE: &str =
    "================================================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Graphql,
    Rest,
    Tie,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub token_savings: i64,
    pub token_savings_pct: f64,
    pub call_reduction: i64,
    pub call_reduction_pct: f64,
    pub latency_savings_ms: f64,
    pub latency_savings_pct: f64,
    pub winner: Winner,
}

pub fn compare(rest: &AgentRunResult, graphql: &AgentRunResult) -> Comparison {
    let rest_tokens = rest.usage.total() as i64;
    let graphql_tokens = graphql.usage.total() as i64;
    let token_savings = rest_tokens - graphql_tokens;

    let call_reduction = rest.call_count as i64 - graphql.call_count as i64;
    let latency_savings_ms = rest.latency_ms() - graphql.latency_ms();

    let winner = match token_savings {
        s if s > 0 => Winner::Graphql,
        s if s < 0 => Winner::Rest,
        _ => Winner::Tie,
    };

    Comparison {
        token_savings,
        token_savings_pct: reduction_pct(token_savings as f64, rest_tokens as f64),
        call_reduction,
        call_reduction_pct: reduction_pct(call_reduction as f64, rest.call_count as f64),
        latency_savings_ms,
        latency_savings_pct: reduction_pct(latency_savings_ms, rest.latency_ms()),
        winner,
    }
}

fn reduction_pct(saved: f64, base: f64) -> f64 {
    if base > 0.0 {
        saved / base * 100.0
    } else {
        0.0
    }
}

pub fn render_report(
    task_name: &str,
    task: &str,
    rest: &AgentRunResult,
    graphql: &AgentRunResult,
) -> String {
    let comparison = compare(rest, graphql);
    let mut out = String::new();

    let _ = writeln!(out, "{DOUBLE_RULE}");
    let _ = writeln!(out, "COMPARISON RESULTS: GraphQL vs REST — {task_name}");
    let _ = writeln!(out, "Task: {task}");
    let _ = writeln!(out, "{DOUBLE_RULE}");

    render_agent_section(&mut out, rest);
    render_agent_section(&mut out, graphql);

    let _ = writeln!(out, "\nAnalysis");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  Token savings:      {} tokens ({:.1}% reduction)",
        comparison.token_savings, comparison.token_savings_pct
    );
    let _ = writeln!(
        out,
        "  API call reduction: {} fewer calls ({:.1}% reduction)",
        comparison.call_reduction, comparison.call_reduction_pct
    );
    let _ = writeln!(
        out,
        "  Latency delta:      {:.0} ms ({:.1}%)",
        comparison.latency_savings_ms, comparison.latency_savings_pct
    );
    let verdict = match comparison.winner {
        Winner::Graphql => "GraphQL was more token-efficient",
        Winner::Rest => "REST was more token-efficient",
        Winner::Tie => "Both approaches used the same number of tokens",
    };
    let _ = writeln!(out, "  Verdict:            {verdict}");

    let _ = writeln!(out, "\nKey takeaways");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  1. GraphQL reduces API roundtrips by fetching hierarchical data in one query"
    );
    let _ = writeln!(
        out,
        "  2. Schema descriptions improve tool calling precision for LLMs"
    );
    let _ = writeln!(
        out,
        "  3. For non-hierarchical data, the difference may be minimal"
    );
    let _ = writeln!(
        out,
        "  4. Token efficiency matters for cost and latency in LLM applications"
    );
    let _ = writeln!(out, "{DOUBLE_RULE}");

    out
}

fn render_agent_section(out: &mut String, result: &AgentRunResult) {
    let _ = writeln!(out, "\n{} agent", result.transport);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Result: {}", result.final_text);
    let _ = writeln!(out, "Metrics:");
    let _ = writeln!(out, "  API calls:     {}", result.call_count);
    let _ = writeln!(out, "  Latency:       {:.0} ms", result.latency_ms());
    let _ = writeln!(out, "  Input tokens:  {}", result.usage.input_tokens);
    let _ = writeln!(out, "  Output tokens: {}", result.usage.output_tokens);
    let _ = writeln!(out, "  Total tokens:  {}", result.usage.total());
    if !result.call_log.is_empty() {
        let _ = writeln!(out, "Calls:");
        for (i, record) in result.call_log.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {:<20} {}",
                i + 1,
                record.tool,
                single_line(&record.metadata.to_string(), 120)
            );
        }
    }
}

fn single_line(s: &str, max: usize) -> String {
    let flattened: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= max {
        return flattened;
    }
    let mut out: String = flattened.chars().take(max).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::llm::provider::TokenUsage;
    use crate::tools::definition::CallMetadata;
    use crate::agent::CallRecord;

    fn run(transport: &str, input: u64, output: u64, calls: u64, latency_ms: u64) -> AgentRunResult {
        AgentRunResult {
            run_id: Uuid::new_v4(),
            transport: transport.to_string(),
            final_text: "answer".to_string(),
            usage: TokenUsage {
                input_tokens: input,
                output_tokens: output,
            },
            call_count: calls,
            latency: Duration::from_millis(latency_ms),
            call_log: Vec::new(),
        }
    }

    #[test]
    fn graphql_wins_on_fewer_tokens() {
        let rest = run("REST", 4000, 1000, 6, 9000);
        let graphql = run("GraphQL", 1000, 200, 1, 3000);

        let comparison = compare(&rest, &graphql);
        assert_eq!(comparison.winner, Winner::Graphql);
        assert_eq!(comparison.token_savings, 3800);
        assert!((comparison.token_savings_pct - 76.0).abs() < 1e-9);
        assert_eq!(comparison.call_reduction, 5);
        assert!((comparison.call_reduction_pct - 83.333).abs() < 0.001);
    }

    #[test]
    fn rest_can_win_too() {
        let rest = run("REST", 500, 100, 1, 1000);
        let graphql = run("GraphQL", 1000, 200, 1, 1200);

        let comparison = compare(&rest, &graphql);
        assert_eq!(comparison.winner, Winner::Rest);
        assert_eq!(comparison.token_savings, -600);
    }

    #[test]
    fn zero_denominators_do_not_blow_up() {
        let rest = run("REST", 0, 0, 0, 0);
        let graphql = run("GraphQL", 0, 0, 0, 0);

        let comparison = compare(&rest, &graphql);
        assert_eq!(comparison.winner, Winner::Tie);
        assert_eq!(comparison.token_savings_pct, 0.0);
        assert_eq!(comparison.call_reduction_pct, 0.0);
    }

    #[test]
    fn report_includes_metrics_and_call_log() {
        let mut rest = run("REST", 4000, 1000, 2, 9000);
        rest.call_log = vec![
            CallRecord {
                tool: "get_user".to_string(),
                metadata: CallMetadata::Http {
                    method: "GET".to_string(),
                    path: "/rest/users/1".to_string(),
                },
                payload: "{}".to_string(),
            },
            CallRecord {
                tool: "get_user_posts".to_string(),
                metadata: CallMetadata::Http {
                    method: "GET".to_string(),
                    path: "/rest/users/1/posts".to_string(),
                },
                payload: "[]".to_string(),
            },
        ];
        let mut graphql = run("GraphQL", 1000, 200, 1, 3000);
        graphql.call_log = vec![CallRecord {
            tool: "graphql_query".to_string(),
            metadata: CallMetadata::Graphql {
                query: "query {\n  user(id: \"1\") { id }\n}".to_string(),
            },
            payload: "{}".to_string(),
        }];

        let report = render_report("Simple User Query", "Get user 1", &rest, &graphql);
        assert!(report.contains("REST agent"));
        assert!(report.contains("GraphQL agent"));
        assert!(report.contains("GET /rest/users/1"));
        // Multiline queries are flattened in the call log.
        assert!(report.contains("query { user(id: \"1\") { id } }"));
        assert!(report.contains("Total tokens:  5000"));
        assert!(report.contains("GraphQL was more token-efficient"));
    }

    #[test]
    fn long_metadata_is_truncated() {
        let line = single_line(&"x".repeat(300), 120);
        assert_eq!(line.chars().count(), 121);
        assert!(line.ends_with('…'));
    }
}

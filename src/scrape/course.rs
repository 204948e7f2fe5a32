//! Per-course schedule fetching
//!
//! Second stage of the pipeline: fetch one branch's schedule page and
//! extract its table. Nothing on this path is allowed to fail the run; one
//! unavailable schedule must never abort its sibling fetches, so every
//! failure degrades to [`FetchOutcome::NoData`].

use crate::config::Config;
use crate::levels::ProgramLevel;
use crate::scrape::fetcher::fetch_text;
use crate::scrape::parser::{parse_schedule_html, ScheduleTable};
use reqwest::Client;

/// Marker string whose presence indicates an embedded schedule table
const TABLE_MARKER: &str = "dersProgramContainer";

/// Result of one course-fetch task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A non-empty normalized schedule table
    Table(ScheduleTable),

    /// The branch has no schedule data (or fetching/parsing it degraded)
    NoData,

    /// The task itself blew up; recorded so siblings keep running
    Failed(String),
}

/// Fetches and normalizes one course's schedule table
///
/// Degrades rather than fails:
/// - Retry exhaustion on the underlying fetch → `NoData`
/// - Response body without the table marker → `NoData` (content-level
///   "nothing to show", not a transport problem)
/// - Marker present but no table or no rows → `NoData`
///
/// # Arguments
///
/// * `client` - The HTTP client
/// * `config` - Retry and endpoint settings
/// * `level` - Program level of the branch
/// * `branch_id` - Opaque branch id from enumeration
/// * `course_code` - Course code, used only for logging here
///
/// # Returns
///
/// A [`FetchOutcome`], never an error.
pub async fn fetch_course(
    client: &Client,
    config: &Config,
    level: ProgramLevel,
    branch_id: i64,
    course_code: &str,
) -> FetchOutcome {
    let url = format!(
        "{}/DersProgramSearch?ProgramSeviyeTipiAnahtari={}&dersBransKoduId={}",
        config.base_url,
        level.key(),
        branch_id
    );

    let body = match fetch_text(client, config, &url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!("Giving up on {} ({}): {}", course_code, level.key(), e);
            return FetchOutcome::NoData;
        }
    };

    if !body.contains(TABLE_MARKER) {
        return FetchOutcome::NoData;
    }

    match parse_schedule_html(&body) {
        Some(table) if !table.is_empty() => FetchOutcome::Table(table),
        _ => FetchOutcome::NoData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::fetcher::build_http_client;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            base_url,
            max_retries: 2,
            retry_delay_ms: 10,
            ..Config::default()
        }
    }

    fn schedule_page(table_body: &str) -> String {
        format!(
            r#"<html><body><div class="dersProgramContainer"><table>{}</table></div></body></html>"#,
            table_body
        )
    }

    #[tokio::test]
    async fn test_fetch_course_returns_table() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DersProgramSearch"))
            .and(query_param("ProgramSeviyeTipiAnahtari", "LS"))
            .and(query_param("dersBransKoduId", "101"))
            .respond_with(ResponseTemplate::new(200).set_body_string(schedule_page(
                "<tr><th>Code</th><th>Day</th></tr><tr><td>MAT101</td><td>Mon</td></tr>",
            )))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let outcome =
            fetch_course(&client, &config, ProgramLevel::Undergraduate, 101, "MAT").await;

        match outcome {
            FetchOutcome::Table(table) => {
                assert_eq!(table.columns, vec!["Code", "Day"]);
                assert_eq!(table.rows, vec![vec!["MAT101", "Mon"]]);
            }
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_marker_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DersProgramSearch"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>No records found.</body></html>"),
            )
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let outcome =
            fetch_course(&client, &config, ProgramLevel::Undergraduate, 102, "FIZ").await;
        assert_eq!(outcome, FetchOutcome::NoData);
    }

    #[tokio::test]
    async fn test_permanent_transport_failure_degrades_to_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DersProgramSearch"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let outcome = fetch_course(&client, &config, ProgramLevel::Graduate, 103, "KIM").await;
        assert_eq!(outcome, FetchOutcome::NoData);
    }

    #[tokio::test]
    async fn test_marker_without_rows_is_no_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/DersProgramSearch"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(schedule_page("<tr><th>Code</th><th>Day</th></tr>")),
            )
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let outcome =
            fetch_course(&client, &config, ProgramLevel::Undergraduate, 104, "BIO").await;
        assert_eq!(outcome, FetchOutcome::NoData);
    }
}

//! Branch enumeration
//!
//! First stage of the pipeline: for one program level, ask the API which
//! subject branches exist. Each branch pairs an externally meaningful course
//! code with the opaque numeric id the detail endpoint wants.

use crate::config::Config;
use crate::levels::ProgramLevel;
use crate::scrape::fetcher::fetch_text;
use crate::ScrapeError;
use reqwest::Client;
use serde::Deserialize;

/// One subject/branch within a program level
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BranchEntry {
    /// Course code, e.g. "MAT"
    #[serde(rename = "dersBransKodu")]
    pub course_code: String,

    /// Opaque id used in the schedule detail query
    #[serde(rename = "bransKoduId")]
    pub branch_id: i64,
}

/// Fetches the branch list for one program level
///
/// An empty list is a legitimate answer (a level with no published
/// schedules), not an error. Retry exhaustion or a malformed response body
/// is fatal to this level only; the caller skips the level and continues.
///
/// # Arguments
///
/// * `client` - The HTTP client
/// * `config` - Retry and endpoint settings
/// * `level` - The program level to enumerate
///
/// # Returns
///
/// * `Ok(Vec<BranchEntry>)` - Branches for the level, possibly empty
/// * `Err(ScrapeError)` - Fetch exhausted retries or the body was not a branch list
pub async fn list_branches(
    client: &Client,
    config: &Config,
    level: ProgramLevel,
) -> Result<Vec<BranchEntry>, ScrapeError> {
    let url = format!(
        "{}/SearchBransKoduByProgramSeviye?programSeviyeTipiAnahtari={}",
        config.base_url,
        level.key()
    );

    let body = fetch_text(client, config, &url).await?;

    serde_json::from_str(&body).map_err(|source| ScrapeError::BranchDecode {
        level: level.key(),
        source,
    })
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

    #[tokio::test]
    async fn test_list_branches_decodes_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SearchBransKoduByProgramSeviye"))
            .and(query_param("programSeviyeTipiAnahtari", "LS"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"dersBransKodu":"MAT","bransKoduId":101},{"dersBransKodu":"FIZ","bransKoduId":102}]"#,
            ))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let branches = list_branches(&client, &config, ProgramLevel::Undergraduate)
            .await
            .unwrap();

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].course_code, "MAT");
        assert_eq!(branches[0].branch_id, 101);
        assert_eq!(branches[1].course_code, "FIZ");
    }

    #[tokio::test]
    async fn test_empty_branch_list_is_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SearchBransKoduByProgramSeviye"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let branches = list_branches(&client, &config, ProgramLevel::Graduate)
            .await
            .unwrap();
        assert!(branches.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SearchBransKoduByProgramSeviye"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let err = list_branches(&client, &config, ProgramLevel::Associate)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::BranchDecode { level: "OL", .. }));
    }

    #[tokio::test]
    async fn test_retry_exhaustion_surfaces_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/SearchBransKoduByProgramSeviye"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = test_config(server.uri());
        let client = build_http_client(&config).unwrap();
        let err = list_branches(&client, &config, ProgramLevel::Undergraduate)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch(_)));
    }
}

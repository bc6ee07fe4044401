//! HTTP client for the survey gateway, the API over the relational store.
//!
//! Semester codes are typed before a URL is ever built, so an unknown code
//! can never reach the wire as a silent default. Non-2xx responses are
//! errors; callers decide whether that means "no data" (resolution checks)
//! or a retryable empty state (final data fetches).

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::majors::Major;
use crate::project::Project;
use crate::resolver::EntrySource;
use crate::term::{SemesterFilter, Term};
use crate::winners::WinnerEntry;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
}

pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response)
    }

    /// `GET /survey/{major}/term={sp|fa}-{year}`: a major's listing, with
    /// the interdisciplinary title rule applied store-side.
    pub async fn survey_by_major(
        &self,
        major: Major,
        term: Term,
    ) -> Result<Vec<Project>, GatewayError> {
        self.fetch(&format!(
            "/survey/{}/term={}-{}",
            major.slug(),
            term.semester.code(),
            term.year
        ))
        .await
    }

    /// `GET /survey/{sp|su|fa|all}/{year}`: major-agnostic listing.
    pub async fn survey_by_term(
        &self,
        filter: SemesterFilter,
        year: i32,
    ) -> Result<Vec<Project>, GatewayError> {
        self.fetch(&format!("/survey/{}/{}", filter.code(), year))
            .await
    }

    /// `GET /projects/{sp|su|fa|all}/{year}`: the editorial view, which
    /// buckets by the wide month convention.
    pub async fn projects_by_term(
        &self,
        filter: SemesterFilter,
        year: i32,
    ) -> Result<Vec<Project>, GatewayError> {
        self.fetch(&format!("/projects/{}/{}", filter.code(), year))
            .await
    }

    /// `GET /winners`: curated rows with the display season and year
    /// already derived.
    pub async fn winners(&self) -> Result<Vec<WinnerEntry>, GatewayError> {
        self.fetch("/winners").await
    }
}

#[async_trait]
impl EntrySource for Gateway {
    async fn has_entries(&self, major: Major, term: Term) -> Result<bool, GatewayError> {
        let projects = self.survey_by_major(major, term).await?;

        Ok(!projects.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "id": 1,
        "projectTitle": "CS/E 401 Robotics",
        "projectDescription": "d",
        "sponsor": "Acme",
        "teamMemberNames": "Ada",
        "major": "computer-science",
        "submitDate": "2024-11-05 14:30:00"
    }"#;

    #[tokio::test]
    async fn test_survey_by_major_url_and_decode() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/survey/computer-science/term=fa-2024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{ROW}]"))
            .create_async()
            .await;

        let gateway = Gateway::new(
            format!("{}/api", server.url()),
            Duration::from_secs(5),
        )
        .unwrap();

        let term = Term::parse("fa", "2024").unwrap();
        let projects = gateway
            .survey_by_major(Major::ComputerScience, term)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].project_title, "CS/E 401 Robotics");
    }

    #[tokio::test]
    async fn test_has_entries_false_on_empty_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/survey/informatics/term=sp-2025")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let gateway =
            Gateway::new(format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();

        let term = Term::parse("sp", "2025").unwrap();
        let has = gateway
            .has_entries(Major::Informatics, term)
            .await
            .unwrap();

        assert!(!has);
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/winners")
            .with_status(500)
            .create_async()
            .await;

        let gateway =
            Gateway::new(format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();

        assert!(gateway.winners().await.is_err());
    }

    #[tokio::test]
    async fn test_winners_decode_wire_shape() {
        let body = r#"[{
            "course": "computer-science",
            "video": null,
            "position": 2,
            "members": "Ada",
            "Sponsor": "Acme",
            "description": "d",
            "ProjectTitle": "CS/E 401 Robotics",
            "winning_pic": "a.png,b.png",
            "id": 9,
            "year": 2024,
            "semester": "Fall"
        }]"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/winners")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let gateway =
            Gateway::new(format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();

        let winners = gateway.winners().await.unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].position, 2);
        assert_eq!(winners[0].sponsor, "Acme");
    }

    #[tokio::test]
    async fn test_editorial_routes_accept_the_all_sentinel() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/projects/all/2024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let gateway =
            Gateway::new(format!("{}/api", server.url()), Duration::from_secs(5)).unwrap();

        let projects = gateway
            .projects_by_term(SemesterFilter::All, 2024)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(projects.is_empty());
    }
}

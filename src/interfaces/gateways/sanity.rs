use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{errors::AppError, gateways::content::ContentGateway, settings::AppConfig};

const PROJECT_FIELDS: &str =
    "_id, title, description, images, githubLink, liveLink, technologies, features, challenges, learnings";
const BLOG_FIELDS: &str =
    "_id, title, slug, description, content, images, author, publishedAt, tags";
const SKILL_FIELDS: &str = "_id, name, image, category, description";

/// Envelope the query API wraps every result in.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Option<Value>,
}

/// HTTP client for the content store's query endpoint. Queries are GROQ,
/// URL-encoded into the `query` parameter; `$name` parameters travel as
/// JSON-encoded values.
#[derive(Debug, Clone)]
pub struct SanityGateway {
    http: reqwest::Client,
    query_url: String,
    api_token: Option<String>,
}

impl SanityGateway {
    pub fn new(config: &AppConfig) -> Self {
        let host = if config.content_use_cdn {
            "apicdn.sanity.io"
        } else {
            "api.sanity.io"
        };
        let query_url = format!(
            "https://{}.{}/v{}/data/query/{}",
            config.content_project_id, host, config.content_api_version, config.content_dataset
        );

        SanityGateway {
            http: reqwest::Client::new(),
            query_url,
            api_token: config.content_api_token.clone(),
        }
    }

    async fn query(&self, groq: &str, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let mut url = format!("{}?query={}", self.query_url, urlencoding::encode(groq));
        for (name, value) in params {
            let json_value = Value::String((*value).to_string()).to_string();
            url.push_str(&format!("&%24{}={}", name, urlencoding::encode(&json_value)));
        }

        let mut request = self.http.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AppError::BadGateway(format!(
                "Content store query failed with status {}",
                response.status()
            )));
        }

        let envelope: QueryResponse = response.json().await?;
        Ok(envelope.result.unwrap_or(Value::Null))
    }

    async fn query_collection(&self, groq: &str) -> Result<Vec<Value>, AppError> {
        match self.query(groq, &[]).await? {
            Value::Array(records) => Ok(records),
            Value::Null => Ok(Vec::new()),
            _ => Err(AppError::BadGateway(
                "Content store returned an unexpected result shape".to_string(),
            )),
        }
    }

    async fn query_single(
        &self,
        groq: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<Value>, AppError> {
        match self.query(groq, params).await? {
            Value::Null => Ok(None),
            record => Ok(Some(record)),
        }
    }
}

#[async_trait]
impl ContentGateway for SanityGateway {
    async fn fetch_projects(&self) -> Result<Vec<Value>, AppError> {
        self.query_collection(&format!(r#"*[_type == "project"]{{{PROJECT_FIELDS}}}"#))
            .await
    }

    async fn fetch_project_by_id(&self, id: &str) -> Result<Option<Value>, AppError> {
        self.query_single(
            &format!(r#"*[_type == "project" && _id == $id][0]{{{PROJECT_FIELDS}}}"#),
            &[("id", id)],
        )
        .await
    }

    async fn fetch_blog_posts(&self) -> Result<Vec<Value>, AppError> {
        self.query_collection(&format!(
            r#"*[_type == "blog"] | order(publishedAt desc){{{BLOG_FIELDS}}}"#
        ))
        .await
    }

    async fn fetch_blog_post_by_slug(&self, slug: &str) -> Result<Option<Value>, AppError> {
        self.query_single(
            &format!(r#"*[_type == "blog" && slug.current == $slug][0]{{{BLOG_FIELDS}}}"#),
            &[("slug", slug)],
        )
        .await
    }

    async fn fetch_skills(&self) -> Result<Vec<Value>, AppError> {
        self.query_collection(&format!(r#"*[_type == "skill"]{{{SKILL_FIELDS}}}"#))
            .await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        self.query(r#"count(*[_type == "project"])"#, &[])
            .await
            .map(|_| ())
    }
}

//! OpenAPI document and Scalar reference for the listing routes.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use devflow_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new().with_open_api(OpenApiConfig::default());
//! ```

use aide::axum::ApiRouter;
use aide::openapi::{Info, License, OpenApi, Tag};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Where the generated document and its Scalar UI are served.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

fn listing_api() -> OpenApi {
    let info = Info {
        title: "Devflow Listings".to_owned(),
        summary: Some("Paginated question and tag listings".to_owned()),
        description: Some(
            "Lists questions by `newest`, `unanswered` or `popular` and tags by question \
            count. Pages are 1-based; `hasNext` reports whether another page exists. \
            Every response is an envelope with `success` and either `data` or `error`."
                .to_owned(),
        ),
        license: Some(License {
            name: "MIT".to_owned(),
            identifier: Some("MIT".to_owned()),
            ..License::default()
        }),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        ..Info::default()
    };

    let tag = |name: &str, description: &str| Tag {
        name: name.to_owned(),
        description: Some(description.to_owned()),
        ..Tag::default()
    };

    OpenApi {
        info,
        tags: vec![
            tag("Questions", "Question listings with their tags populated."),
            tag("Tags", "Tag listings ordered by question count."),
            tag("Health", "Document store reachability."),
        ],
        ..OpenApi::default()
    }
}

/// Extension trait serving the OpenAPI document of an [`ApiRouter`].
pub trait RouterOpenApiExt<S> {
    /// Finishes the router and serves its document and the Scalar UI.
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let mut api = listing_api();
        let scalar = Scalar::new(&config.open_api_json);

        self.route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi))
            .finish_api(&mut api)
            .layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;

    #[tokio::test]
    async fn document_describes_listing_api() -> anyhow::Result<()> {
        let config = OpenApiConfig {
            open_api_json: "/openapi.json".to_owned(),
            ..OpenApiConfig::default()
        };
        let router: Router = ApiRouter::new().with_open_api(config);
        let server = TestServer::new(router)?;

        let response = server.get("/openapi.json").await;
        response.assert_status_ok();

        let document = response.json::<Value>();
        assert_eq!(document["info"]["title"], "Devflow Listings");
        let tags: Vec<&str> = document["tags"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|tag| tag["name"].as_str())
            .collect();
        assert_eq!(tags, vec!["Questions", "Tags", "Health"]);
        Ok(())
    }
}

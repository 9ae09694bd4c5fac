//! Route table for the HTTP API.
//!
//! Routing is transport-free so it can be driven directly from tests; the
//! tiny_http loop in `mod.rs` only converts requests and responses.

use std::path::PathBuf;

use anyhow::Context;
use parrain_core::CohortRegistry;
use parrain_core::errors::ErrorKind;
use parrain_core::responses::{
    DrawResponse, ImportResponse, MessageResponse, ResetResponse, UndoResponse,
};
use parrain_db::service::ParrainService;
use parrain_engine::{PairingEngine, PairingError, export, feed, report, undo_last};
use serde_json::json;

use super::response::ApiResponse;
use crate::context::AppContext;

const KNOWN_ROUTES: [(&str, &str); 7] = [
    ("GET", "/"),
    ("POST", "/api/import"),
    ("POST", "/api/reset"),
    ("GET", "/api/draw"),
    ("POST", "/api/undo"),
    ("GET", "/api/stats"),
    ("GET", "/api/export/csv"),
];

/// Everything a request handler needs, resolved once at startup.
pub struct Api {
    service: ParrainService,
    registry: CohortRegistry,
    engine: PairingEngine,
    feed_path: PathBuf,
    import_delimiter: u8,
    export_delimiter: u8,
    export_file_name: String,
    cors_origin: String,
}

impl Api {
    /// Consume the app context. Delimiters are validated here so a bad config
    /// fails at startup rather than on the first request.
    pub fn from_context(ctx: AppContext) -> anyhow::Result<Self> {
        let feed_path = ctx.resolve(&ctx.config.import.csv_path);
        let import_delimiter = ctx
            .config
            .import
            .delimiter_byte()
            .context("invalid [import] configuration")?;
        let export_delimiter = ctx
            .config
            .export
            .delimiter_byte()
            .context("invalid [export] configuration")?;
        let engine = PairingEngine::from_seed(ctx.registry.clone(), ctx.config.draw.seed);

        Ok(Self {
            service: ctx.service,
            registry: ctx.registry,
            engine,
            feed_path,
            import_delimiter,
            export_delimiter,
            export_file_name: ctx.config.export.file_name,
            cors_origin: ctx.config.server.cors_origin,
        })
    }

    /// Dispatch one request. `path` may carry a query string, which is ignored.
    pub async fn route(&mut self, method: &str, path: &str) -> ApiResponse {
        let path = path.split_once('?').map_or(path, |(path, _)| path);
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        let response = match (method, path) {
            ("OPTIONS", _) => ApiResponse::no_content()
                .with_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS")
                .with_header("Access-Control-Allow-Headers", "Content-Type"),
            ("GET", "/") => ApiResponse::json(200, &json!({ "status": "Server is running" })),
            ("POST", "/api/import") => self.import().await,
            ("POST", "/api/reset") => self.reset().await,
            ("GET", "/api/draw") => self.draw().await,
            ("POST", "/api/undo") => self.undo().await,
            ("GET", "/api/stats") => self.stats().await,
            ("GET", "/api/export/csv") => self.export().await,
            _ if KNOWN_ROUTES.iter().any(|(_, known)| *known == path) => {
                ApiResponse::error(405, "method not allowed")
            }
            _ => ApiResponse::error(404, "not found"),
        };

        if path.starts_with("/api") || method == "OPTIONS" {
            response.with_header("Access-Control-Allow-Origin", self.cors_origin.clone())
        } else {
            response
        }
    }

    async fn import(&self) -> ApiResponse {
        match feed::import(&self.service, &self.feed_path, self.import_delimiter).await {
            Ok(report) => ApiResponse::json(201, &ImportResponse::success(report)),
            Err(error) => failure(&error),
        }
    }

    async fn reset(&self) -> ApiResponse {
        match self.service.reset_sponsorship().await {
            Ok(report) => ApiResponse::json(
                200,
                &ResetResponse {
                    message: "Sponsorship reset successfully.".to_string(),
                    report,
                },
            ),
            Err(error) => failure(&PairingError::from(error)),
        }
    }

    async fn draw(&mut self) -> ApiResponse {
        match self.engine.draw(&self.service).await {
            Ok(detail) => ApiResponse::json(200, &DrawResponse::from(&detail)),
            Err(error) if error.kind() == ErrorKind::NotFound => ApiResponse::json(
                404,
                &MessageResponse {
                    message: error.to_string(),
                },
            ),
            Err(error) => failure(&error),
        }
    }

    async fn undo(&self) -> ApiResponse {
        match undo_last(&self.service).await {
            Ok(reverted) => ApiResponse::json(
                200,
                &UndoResponse {
                    message: "Last pairing undone.".to_string(),
                    reverted,
                },
            ),
            Err(error) => failure(&error),
        }
    }

    async fn stats(&self) -> ApiResponse {
        match report::stats(&self.service, &self.registry).await {
            Ok(stats) => ApiResponse::json(200, &stats),
            Err(error) => failure(&error),
        }
    }

    async fn export(&self) -> ApiResponse {
        let rows = match export::export_rows(&self.service).await {
            Ok(rows) => rows,
            Err(error) => return failure(&error),
        };
        match export::to_csv(&rows, self.export_delimiter).await {
            Ok(body) => ApiResponse::attachment(body, &self.export_file_name),
            Err(error) => failure(&error),
        }
    }
}

fn failure(error: &PairingError) -> ApiResponse {
    match error.kind() {
        ErrorKind::Validation => ApiResponse::error(400, &error.to_string()),
        ErrorKind::NotFound => ApiResponse::error(404, &error.to_string()),
        ErrorKind::Configuration => ApiResponse::error(500, &error.to_string()),
        ErrorKind::Persistence => {
            tracing::error!(%error, "request failed in the store");
            ApiResponse::error(500, "internal storage error")
        }
    }
}

#[cfg(test)]
mod tests {
    use parrain_config::{ParrainConfig, RuleConfig};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const FEED: &str = "nom,prenom,promotion\n\
        Martin,Léa,B1\n\
        Bernard,Noé,B1\n\
        Durand,Hugo,B2\n\
        Petit,Zoé,X9\n";

    async fn api(root: &TempDir) -> Api {
        let mut config = ParrainConfig::default();
        config.database.path = ":memory:".to_string();
        config.draw.seed = Some(7);
        config.server.cors_origin = "http://localhost:3000".to_string();
        config.sponsorship.cohorts = vec!["B1".into(), "B2".into()];
        config.sponsorship.rules = vec![RuleConfig {
            mentor: "B2".into(),
            mentee: "B1".into(),
        }];
        let ctx = AppContext::init(root.path().to_path_buf(), config)
            .await
            .unwrap();
        Api::from_context(ctx).unwrap()
    }

    fn write_feed(root: &TempDir, text: &str) {
        let dir = root.path().join(".parrain/data");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("students.csv"), text).unwrap();
    }

    #[tokio::test]
    async fn health_route_has_no_cors_header() {
        let root = TempDir::new().unwrap();
        let mut api = api(&root).await;

        let response = api.route("GET", "/").await;
        assert_eq!(response.status, 200);
        assert_eq!(
            response.json_body(),
            json!({ "status": "Server is running" })
        );
        assert_eq!(response.header("Access-Control-Allow-Origin"), None);
    }

    #[tokio::test]
    async fn import_then_draw_then_undo() {
        let root = TempDir::new().unwrap();
        write_feed(&root, FEED);
        let mut api = api(&root).await;

        let imported = api.route("POST", "/api/import").await;
        assert_eq!(imported.status, 201);
        let body = imported.json_body();
        assert_eq!(body["status"], "success");
        assert_eq!(body["imported"], 3);
        assert_eq!(body["skipped_unknown_cohort"], 1);
        assert_eq!(
            imported.header("Access-Control-Allow-Origin"),
            Some("http://localhost:3000")
        );

        let drawn = api.route("GET", "/api/draw").await;
        assert_eq!(drawn.status, 200);
        let body = drawn.json_body();
        assert_eq!(body["filleul"]["promotion"], "B1");
        assert_eq!(body["parrain"]["nom"], "Durand");

        let stats = api.route("GET", "/api/stats").await.json_body();
        assert_eq!(stats, json!({ "remaining_filleuls": 1, "available_parrains": 1 }));

        let undone = api.route("POST", "/api/undo").await;
        assert_eq!(undone.status, 200);
        assert_eq!(undone.json_body()["reverted"]["mentor"]["last_name"], "Durand");

        let again = api.route("POST", "/api/undo").await;
        assert_eq!(again.status, 404);
        assert!(again.json_body()["error"].is_string());
    }

    #[tokio::test]
    async fn missing_feed_is_404_and_bad_columns_400() {
        let root = TempDir::new().unwrap();
        let mut api = api(&root).await;
        assert_eq!(api.route("POST", "/api/import").await.status, 404);

        write_feed(&root, "nom,promotion\nMartin,B1\n");
        let response = api.route("POST", "/api/import").await;
        assert_eq!(response.status, 400);
        assert!(
            response.json_body()["error"]
                .as_str()
                .unwrap()
                .contains("prenom")
        );
    }

    #[tokio::test]
    async fn draw_without_mentees_reports_message() {
        let root = TempDir::new().unwrap();
        let mut api = api(&root).await;

        let response = api.route("GET", "/api/draw").await;
        assert_eq!(response.status, 404);
        assert!(response.json_body()["message"].is_string());
    }

    #[tokio::test]
    async fn export_is_a_csv_attachment() {
        let root = TempDir::new().unwrap();
        write_feed(&root, FEED);
        let mut api = api(&root).await;

        assert_eq!(api.route("GET", "/api/export/csv").await.status, 404);

        api.route("POST", "/api/import").await;
        api.route("GET", "/api/draw").await;
        let response = api.route("GET", "/api/export/csv").await;
        assert_eq!(response.status, 200);
        assert!(response.content_type.starts_with("text/csv"));
        assert_eq!(
            response.header("Content-Disposition"),
            Some("attachment; filename=\"binomes.csv\"")
        );
        let text = String::from_utf8(response.body).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Durand"));
    }

    #[tokio::test]
    async fn reset_clears_the_ledger() {
        let root = TempDir::new().unwrap();
        write_feed(&root, FEED);
        let mut api = api(&root).await;
        api.route("POST", "/api/import").await;
        api.route("GET", "/api/draw").await;

        let response = api.route("POST", "/api/reset").await;
        assert_eq!(response.status, 200);
        let body = response.json_body();
        assert_eq!(body["message"], "Sponsorship reset successfully.");
        assert_eq!(body["pairings_removed"], 1);

        let stats = api.route("GET", "/api/stats").await.json_body();
        assert_eq!(stats["remaining_filleuls"], 2);
    }

    #[tokio::test]
    async fn unknown_routes_and_methods() {
        let root = TempDir::new().unwrap();
        let mut api = api(&root).await;

        assert_eq!(api.route("GET", "/api/nope").await.status, 404);
        assert_eq!(api.route("GET", "/api/reset").await.status, 405);
        assert_eq!(api.route("GET", "/api/stats?x=1").await.status, 200);
        assert_eq!(api.route("GET", "/api/stats/").await.status, 200);

        let preflight = api.route("OPTIONS", "/api/draw").await;
        assert_eq!(preflight.status, 204);
        assert!(preflight.body.is_empty());
        assert_eq!(
            preflight.header("Access-Control-Allow-Methods"),
            Some("GET, POST, OPTIONS")
        );
    }
}

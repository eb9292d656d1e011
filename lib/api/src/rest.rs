use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use orderflow_core::ProductId;
use orderflow_similarity::{ExplainedScore, ScoreError, SimilarityScorer, SimilarityStats};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::info;

#[derive(Deserialize)]
struct SimilarRequest {
    candidate_ids: Vec<ProductId>,
    #[serde(default)]
    explain: bool,
}

#[derive(Serialize)]
struct SimilarResponse {
    target_id: ProductId,
    scores: BTreeMap<ProductId, f64>,
    missing: BTreeSet<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explained: Option<Vec<ExplainedScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SimilarityStats>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    products: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(scorer: Arc<SimilarityScorer>, port: u16) -> std::io::Result<()> {
        info!(port, products = scorer.products().len(), "similarity API listening");
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(scorer.clone()))
                .configure(RestApi::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register the API routes; expects `web::Data<Arc<SimilarityScorer>>` app data
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/products/{id}", web::get().to(get_product))
            .route("/products/{id}/similar", web::post().to(similar_products));
    }
}

async fn health(scorer: web::Data<Arc<SimilarityScorer>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        products: scorer.products().len(),
    }))
}

async fn get_product(
    scorer: web::Data<Arc<SimilarityScorer>>,
    path: web::Path<ProductId>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    if let Some(product) = scorer.products().get(id) {
        Ok(HttpResponse::Ok().json(product))
    } else {
        Ok(not_found(ScoreError::ProductNotFound(id)))
    }
}

async fn similar_products(
    scorer: web::Data<Arc<SimilarityScorer>>,
    path: web::Path<ProductId>,
    req: web::Json<SimilarRequest>,
) -> ActixResult<HttpResponse> {
    let target_id = path.into_inner();

    let report = match scorer.score(target_id, &req.candidate_ids) {
        Ok(report) => report,
        Err(e) => return Ok(not_found(e)),
    };

    let (explained, stats) = if req.explain {
        match scorer.explain(target_id, &req.candidate_ids) {
            Ok(explained) => {
                let distinct: BTreeSet<ProductId> = req.candidate_ids.iter().copied().collect();
                let stats = SimilarityStats::compute(&explained, distinct.len());
                (Some(explained), Some(stats))
            }
            Err(e) => return Ok(not_found(e)),
        }
    } else {
        (None, None)
    };

    Ok(HttpResponse::Ok().json(SimilarResponse {
        target_id,
        scores: report.scores,
        missing: report.missing,
        explained,
        stats,
    }))
}

fn not_found(error: ScoreError) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": error.to_string()
    }))
}

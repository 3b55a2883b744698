use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::dataset;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// GET /api/students plus a liveness probe.
pub fn routes(
    data_path: PathBuf,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let data_path = Arc::new(data_path);
    let with_path = warp::any().map(move || Arc::clone(&data_path));

    let students = warp::get()
        .and(warp::path!("api" / "students"))
        .and(with_path)
        .map(|path: Arc<PathBuf>| students_reply(&path));

    let health = warp::get().and(warp::path!("health")).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "service": "student-persona-dashboard",
        }))
    });

    students.or(health)
}

// Fresh read and parse per request; values stay strings, coercion is the
// consumer's concern.
fn students_reply(path: &Path) -> impl Reply {
    match dataset::load(path) {
        Ok(table) => {
            info!(rows = table.rows.len(), "served student dataset");
            warp::reply::with_status(warp::reply::json(&table.rows), StatusCode::OK)
        }
        Err(e) => {
            error!("failed to serve student dataset: {e}");
            warp::reply::with_status(
                warp::reply::json(&ErrorResponse {
                    error: e.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}

pub async fn serve(data_path: PathBuf, port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!(%addr, data = %data_path.display(), "dashboard API listening");
    warp::serve(routes(data_path)).run(addr).await;
}

//! HTTP surface: the list page, its mutation endpoints and a small JSON API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, Json, Redirect},
    routing::{get, post},
    Form, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::board::{Board, NewTask};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ui;
use crate::view::{TaskView, ALL_CATEGORIES};

/// Handle shared by every request. The lock is held for a whole
/// read-modify-write so requests within one process never interleave.
pub type SharedBoard = Arc<Mutex<Board>>;

pub fn router(board: SharedBoard) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_task))
        .route("/complete/{index}", get(complete_task))
        .route("/delete/{index}", get(delete_task))
        .route("/categories", post(add_category))
        .route("/api/tasks", get(api_tasks))
        .route("/api/categories", get(api_categories))
        .layer(TraceLayer::new_for_http())
        .with_state(board)
}

pub async fn serve(config: Config) -> Result<()> {
    let board = Arc::new(Mutex::new(Board::open(&config.storage)));
    let app = router(board);

    let addr = config.server.bind;
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    category: Option<String>,
}

/// Category the page was showing when a mutation was triggered.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnTo {
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    task: String,
    due: Option<String>,
    color: Option<String>,
    category: Option<String>,
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddCategoryForm {
    #[serde(default)]
    name: String,
    filter: Option<String>,
}

async fn index(State(board): State<SharedBoard>, Query(query): Query<ListQuery>) -> Html<String> {
    let view = board.lock().list(query.category.as_deref());
    Html(ui::render_page(&view))
}

async fn add_task(State(board): State<SharedBoard>, Form(form): Form<AddTaskForm>) -> Redirect {
    let added = board.lock().add_task(NewTask {
        task: form.task,
        due: form.due,
        color: form.color,
        category: form.category,
    });
    if !added {
        tracing::debug!("empty task label, nothing added");
    }
    back_to_list(form.filter.as_deref())
}

async fn complete_task(
    State(board): State<SharedBoard>,
    Path(index): Path<usize>,
    Query(back): Query<ReturnTo>,
) -> Redirect {
    board.lock().complete(index);
    back_to_list(back.filter.as_deref())
}

async fn delete_task(
    State(board): State<SharedBoard>,
    Path(index): Path<usize>,
    Query(back): Query<ReturnTo>,
) -> Redirect {
    board.lock().delete(index);
    back_to_list(back.filter.as_deref())
}

async fn add_category(
    State(board): State<SharedBoard>,
    Form(form): Form<AddCategoryForm>,
) -> Redirect {
    board.lock().add_category(&form.name);
    back_to_list(form.filter.as_deref())
}

async fn api_tasks(
    State(board): State<SharedBoard>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<TaskView>> {
    Json(board.lock().list(query.category.as_deref()).tasks)
}

async fn api_categories(State(board): State<SharedBoard>) -> Json<Vec<String>> {
    Json(board.lock().categories().to_vec())
}

fn back_to_list(filter: Option<&str>) -> Redirect {
    match filter {
        Some(f) if !f.is_empty() && f != ALL_CATEGORIES => {
            Redirect::to(&format!("/?category={}", urlencoding::encode(f)))
        }
        _ => Redirect::to("/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::StorageConfig;

    fn shared_board(temp: &TempDir) -> SharedBoard {
        Arc::new(Mutex::new(Board::open(&StorageConfig::in_dir(temp.path()))))
    }

    async fn send(board: &SharedBoard, request: Request<Body>) -> Response {
        router(board.clone()).oneshot(request).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[tokio::test]
    async fn index_renders_tasks() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);
        board.lock().add_task(NewTask {
            task: "water plants".into(),
            ..NewTask::default()
        });

        let response = send(&board, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("water plants"));
        assert!(page.contains("/complete/0"));
    }

    #[tokio::test]
    async fn add_then_redirects_to_list() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);

        let response = send(
            &board,
            post_form(
                "/add",
                "task=Ship+it&due=2099-01-01T00%3A00&color=%23ff0000&category=Work",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let board = board.lock();
        let task = &board.tasks()[0];
        assert_eq!(task.task, "Ship it");
        assert_eq!(task.due.as_deref(), Some("2099-01-01T00:00"));
        assert_eq!(task.color.as_deref(), Some("#ff0000"));
        assert_eq!(board.categories(), ["General", "Work"]);
    }

    #[tokio::test]
    async fn complete_and_delete_by_index() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);
        for label in ["a", "b"] {
            board.lock().add_task(NewTask {
                task: label.into(),
                ..NewTask::default()
            });
        }

        let response = send(&board, get("/complete/1")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(board.lock().tasks()[1].done);

        send(&board, get("/delete/0")).await;
        let remaining: Vec<_> = board.lock().tasks().iter().map(|t| t.task.clone()).collect();
        assert_eq!(remaining, ["b"]);
    }

    #[tokio::test]
    async fn out_of_range_index_still_redirects() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);

        let response = send(&board, get("/delete/42")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(board.lock().tasks().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_index_is_rejected() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);

        let response = send(&board, get("/complete/first")).await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn mutation_keeps_active_filter() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);

        let response = send(&board, post_form("/categories", "name=Side+Work&filter=Side+Work")).await;
        assert_eq!(location(&response), "/?category=Side%20Work");
        assert_eq!(board.lock().categories(), ["General", "Side Work"]);

        let response = send(&board, get("/delete/0?filter=All")).await;
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn padded_category_query_matches_nothing() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);
        board.lock().add_task(NewTask {
            task: "email".into(),
            category: Some("Work".into()),
            ..NewTask::default()
        });

        let body = body_text(send(&board, get("/api/tasks?category=%20Work")).await).await;
        let padded: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert!(padded.is_empty());

        let response = send(&board, get("/complete/0?filter=R%26D")).await;
        assert_eq!(location(&response), "/?category=R%26D");
    }

    #[tokio::test]
    async fn api_filters_by_category() {
        let temp = TempDir::new().unwrap();
        let board = shared_board(&temp);
        for (label, category) in [("a", "Work"), ("b", "Home"), ("c", "work")] {
            board.lock().add_task(NewTask {
                task: label.into(),
                category: Some(category.into()),
                ..NewTask::default()
            });
        }

        let all: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(send(&board, get("/api/tasks?category=All")).await).await)
                .unwrap();
        assert_eq!(all.len(), 3);

        let work: Vec<serde_json::Value> =
            serde_json::from_str(&body_text(send(&board, get("/api/tasks?category=Work")).await).await)
                .unwrap();
        assert_eq!(work.len(), 1);
        assert_eq!(work[0]["task"], "a");

        let categories: Vec<String> =
            serde_json::from_str(&body_text(send(&board, get("/api/categories")).await).await)
                .unwrap();
        assert_eq!(categories, ["General", "Work", "Home"]);
    }
}

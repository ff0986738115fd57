use axum::{
    Form, Json, Router,
    extract::Path,
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use crate::transport::ApiResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewCategory {
    category_id: String,
    category_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryEdit {
    category_name: String,
}

/// Serve a stand-in for the backend's action endpoints on an ephemeral port
/// and return its base URL.
///
/// Transaction 42 and category FOOD exist, nothing else does.
/// `/broken` answers with a plain text server error.
pub(crate) async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/transactions/{transaction_id}/delete", post(delete_transaction))
        .route("/categories/{category_id}/delete", post(delete_category))
        .route("/categories/{category_id}/edit", post(edit_category))
        .route("/categories/add", post(add_category))
        .route("/broken", post(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind test server");
    let address = listener
        .local_addr()
        .expect("Could not get test server address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test server stopped unexpectedly");
    });

    format!("http://{address}")
}

async fn delete_transaction(Path(transaction_id): Path<String>) -> (StatusCode, Json<ApiResponse>) {
    if transaction_id == "42" {
        (StatusCode::OK, Json(ApiResponse::ok()))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failed("Transaction not found")),
        )
    }
}

async fn delete_category(Path(category_id): Path<String>) -> (StatusCode, Json<ApiResponse>) {
    if category_id == "FOOD" {
        (StatusCode::OK, Json(ApiResponse::ok()))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failed("Category not found")),
        )
    }
}

async fn edit_category(
    Path(category_id): Path<String>,
    Form(edit): Form<CategoryEdit>,
) -> (StatusCode, Json<ApiResponse>) {
    if category_id != "FOOD" {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::failed("Category not found")),
        );
    }

    if edit.category_name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failed("Category name is required")),
        );
    }

    (StatusCode::OK, Json(ApiResponse::ok()))
}

async fn add_category(Form(category): Form<NewCategory>) -> (StatusCode, Json<ApiResponse>) {
    if category.category_id == "FOOD" {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failed(
                "Category ID FOOD already exists. Please use a different ID.",
            )),
        );
    }

    (
        StatusCode::OK,
        Json(ApiResponse {
            message: Some("Category added successfully".to_owned()),
            category_id: Some(category.category_id),
            category_name: Some(category.category_name),
            ..ApiResponse::ok()
        }),
    )
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

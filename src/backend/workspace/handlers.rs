/**
 * Document Handlers
 *
 * HTTP handlers for `/api/files`. Every handler works on the workspace of
 * the caller's identity, supplied by the identity middleware.
 *
 * The store does blocking filesystem I/O, so each call runs on the blocking
 * thread pool.
 *
 * # Routes
 *
 * | Method | Path | Success |
 * |---|---|---|
 * | GET | /api/files | 200, list of `{name, last_edit}` |
 * | POST | /api/files | 201, `{message, filename}` |
 * | GET | /api/files/{filename} | 200, `{filename, content}` |
 * | PUT | /api/files/{filename} | 200, `{message}` |
 * | DELETE | /api/files/{filename} | 200, `{message}` |
 */
use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::ApiError;
use crate::backend::middleware::CurrentUser;
use crate::backend::workspace::{WorkspaceError, WorkspaceStore};
use crate::shared::{
    CreatedDocument, DocumentContent, DocumentSummary, MessageResponse, UpdateDocumentRequest,
};

/// Multipart field carrying the uploaded document
const FILE_FIELD: &str = "file";

/// Run a store operation on the blocking pool
async fn run_blocking<T, F>(store: WorkspaceStore, op: F) -> Result<T, ApiError>
where
    F: FnOnce(WorkspaceStore) -> Result<T, WorkspaceError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(store))
        .await
        .map_err(|e| ApiError::internal(format!("Workspace task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// List the caller's documents
pub async fn list_files(
    State(store): State<WorkspaceStore>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let user_id = identity.user_id;
    let documents = run_blocking(store, move |store| store.list_documents(&user_id)).await?;
    Ok(Json(documents))
}

/// Create a document from the multipart `file` part
///
/// The part's filename names the document and its bytes are the initial
/// content. Empty content becomes the empty graph.
pub async fn create_file(
    State(store): State<WorkspaceStore>,
    CurrentUser(identity): CurrentUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedDocument>), ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        upload = Some((name, bytes));
        break;
    }

    let Some((raw_name, content)) = upload else {
        tracing::warn!("Create request from {} without a file part", identity.user_id);
        return Err(ApiError::bad_request("No file part"));
    };

    let user_id = identity.user_id;
    let log_user = user_id.clone();
    let filename = run_blocking(store, move |store| {
        store.create_document(&user_id, &raw_name, &content)
    })
    .await?;

    tracing::info!("Created {} for {}", filename, log_user);
    Ok((
        StatusCode::CREATED,
        Json(CreatedDocument {
            message: "File created successfully".to_string(),
            filename,
        }),
    ))
}

/// Read a document
pub async fn read_file(
    State(store): State<WorkspaceStore>,
    CurrentUser(identity): CurrentUser,
    Path(filename): Path<String>,
) -> Result<Json<DocumentContent>, ApiError> {
    let user_id = identity.user_id;
    let name = filename.clone();
    let content = run_blocking(store, move |store| store.read_document(&user_id, &name)).await?;
    Ok(Json(DocumentContent { filename, content }))
}

/// Replace a document's content
pub async fn update_file(
    State(store): State<WorkspaceStore>,
    CurrentUser(identity): CurrentUser,
    Path(filename): Path<String>,
    payload: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let content = request
        .content
        .ok_or_else(|| WorkspaceError::invalid_input("No content provided"))?;

    let user_id = identity.user_id;
    let log_user = user_id.clone();
    let name = filename.clone();
    run_blocking(store, move |store| {
        store.update_document(&user_id, &name, &content)
    })
    .await?;

    tracing::info!("Updated {} for {}", filename, log_user);
    Ok(Json(MessageResponse::new("File updated successfully")))
}

/// Delete a document
pub async fn delete_file(
    State(store): State<WorkspaceStore>,
    CurrentUser(identity): CurrentUser,
    Path(filename): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = identity.user_id;
    let log_user = user_id.clone();
    let name = filename.clone();
    run_blocking(store, move |store| store.delete_document(&user_id, &name)).await?;

    tracing::info!("Deleted {} for {}", filename, log_user);
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

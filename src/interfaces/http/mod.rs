mod error;
pub mod payload;

use actix_cors::Cors;
use actix_multipart::{Field, Multipart};
use actix_web::error::JsonPayloadError;
use actix_web::http::header::ContentType;
use actix_web::middleware::{Condition, Logger};
use actix_web::{dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer};
use futures::StreamExt;
use serde_json::Value;
use tracing::{debug, info};

use self::error::log_failure;
use self::payload::{GeneratePayload, GenerateResponse, UploadResponse};
use crate::application::{NameParser, NameSampler};
use crate::domain::error::{AppError, Result};
use crate::domain::{NameList, SourceFormat};
use crate::infrastructure::config::ServerConfig;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Multipart field carrying the names file.
const UPLOAD_FIELD: &str = "file";

pub struct HttpState {
    pub config: ServerConfig,
}

struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

#[post("/upload")]
async fn upload(data: web::Data<HttpState>, payload: Multipart) -> Result<HttpResponse> {
    handle_upload(&data.config, payload)
        .await
        .map(|names| HttpResponse::Ok().json(UploadResponse::from(names)))
        .map_err(|err| {
            log_failure("upload", &err);
            err
        })
}

async fn handle_upload(config: &ServerConfig, payload: Multipart) -> Result<NameList> {
    let file = read_upload(payload, config.max_upload_bytes).await?;

    let format = SourceFormat::from_filename(&file.filename).ok_or_else(|| {
        AppError::InvalidFormat("Only CSV and TXT files are allowed".to_string())
    })?;

    let filename = file.filename;
    let bytes = file.bytes;
    let size = bytes.len();

    let names = web::block(move || NameParser::new().parse(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(format!("Parser task failed: {}", e)))??;

    info!(
        filename = %filename,
        format = %format,
        bytes = size,
        total_names = names.len(),
        "Names uploaded"
    );

    Ok(names)
}

/// Pull the `file` part out of the multipart stream.
///
/// Every byte read, from any part, counts towards `limit`.
async fn read_upload(mut payload: Multipart, limit: usize) -> Result<UploadedFile> {
    let mut consumed = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            debug!(error = %e, "Malformed multipart payload");
            no_file()
        })?;

        if field.name() != Some(UPLOAD_FIELD) {
            read_field(&mut field, limit, &mut consumed, None).await?;
            continue;
        }

        // A `file` part without a filename parameter is a plain form field.
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .ok_or_else(no_file)?;
        if filename.is_empty() {
            return Err(AppError::MissingInput("No file selected".to_string()));
        }

        let mut bytes = Vec::new();
        read_field(&mut field, limit, &mut consumed, Some(&mut bytes)).await?;
        return Ok(UploadedFile { filename, bytes });
    }

    Err(no_file())
}

async fn read_field(
    field: &mut Field,
    limit: usize,
    consumed: &mut usize,
    mut sink: Option<&mut Vec<u8>>,
) -> Result<()> {
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            debug!(error = %e, "Multipart field read failed");
            no_file()
        })?;

        *consumed += chunk.len();
        if *consumed > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        if let Some(buf) = sink.as_deref_mut() {
            buf.extend_from_slice(&chunk);
        }
    }
    Ok(())
}

fn no_file() -> AppError {
    AppError::MissingInput("No file uploaded".to_string())
}

#[post("/generate")]
async fn generate(body: web::Json<Value>) -> Result<HttpResponse> {
    let result = GeneratePayload::from_json(body.into_inner())
        .and_then(GeneratePayload::into_request)
        .and_then(|request| request.into_selection())
        .map(|selection| {
            let selected = NameSampler::sample_request(&selection);
            info!(
                population = selection.names().len(),
                count = selection.count(),
                "Names generated"
            );
            selected
        });

    match result {
        Ok(selected) => Ok(HttpResponse::Ok().json(GenerateResponse::from(selected))),
        Err(err) => {
            log_failure("generate", &err);
            Err(err)
        }
    }
}

fn json_error(
    limit: usize,
) -> impl Fn(JsonPayloadError, &HttpRequest) -> actix_web::Error + Send + Sync + 'static {
    move |err: JsonPayloadError, _req: &HttpRequest| {
        let app_err = match err {
            JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                AppError::PayloadTooLarge { limit }
            }
            other => {
                debug!(error = %other, "Rejected JSON body");
                AppError::MissingInput("Invalid request data".to_string())
            }
        };
        log_failure("generate", &app_err);
        app_err.into()
    }
}

/// Register state, extractor limits and routes.
pub fn configure_app(state: web::Data<HttpState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let limit = state.config.max_upload_bytes;

        cfg.app_data(state)
            .app_data(
                web::JsonConfig::default()
                    .limit(limit)
                    .error_handler(json_error(limit)),
            )
            .service(index)
            .service(upload)
            .service(generate);
    }
}

pub fn start_server(config: ServerConfig) -> std::io::Result<Server> {
    let bind_addr = config.bind_addr();
    let permissive_cors = config.permissive_cors;
    let state = web::Data::new(HttpState { config });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(permissive_cors, Cors::permissive()))
            .wrap(Logger::default())
            .configure(configure_app(state.clone()))
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use serde_json::{json, Value};

    const BOUNDARY: &str = "----name-picker-boundary";

    struct Part<'a> {
        name: &'a str,
        filename: Option<&'a str>,
        body: &'a [u8],
    }

    fn file_part<'a>(filename: &'a str, body: &'a [u8]) -> Part<'a> {
        Part {
            name: "file",
            filename: Some(filename),
            body,
        }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            let disposition = match part.filename {
                Some(filename) => format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                ),
                None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
            };
            body.extend_from_slice(disposition.as_bytes());
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            body.extend_from_slice(part.body);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn config_with_limit(max_upload_bytes: usize) -> ServerConfig {
        ServerConfig {
            max_upload_bytes,
            ..ServerConfig::default()
        }
    }

    async fn call(config: ServerConfig, req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new().configure(configure_app(web::Data::new(HttpState { config }))),
        )
        .await;
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    async fn upload_parts(parts: &[Part<'_>]) -> (StatusCode, Value) {
        upload_with(ServerConfig::default(), parts).await
    }

    async fn upload_with(config: ServerConfig, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let req = test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(parts));
        call(config, req).await
    }

    async fn generate_json(body: Value) -> (StatusCode, Value) {
        let req = test::TestRequest::post().uri("/generate").set_json(body);
        call(ServerConfig::default(), req).await
    }

    #[actix_web::test]
    async fn test_index_serves_html() {
        let app = test::init_service(App::new().configure(configure_app(web::Data::new(
            HttpState {
                config: ServerConfig::default(),
            },
        ))))
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("/upload"));
    }

    #[actix_web::test]
    async fn test_upload_txt() {
        let (status, body) = upload_parts(&[file_part("names.txt", b"Alice\nBob\n\nCarol\n")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "total_names": 3, "names": ["Alice", "Bob", "Carol"] })
        );
    }

    #[actix_web::test]
    async fn test_upload_csv() {
        let (status, body) =
            upload_parts(&[file_part("people.csv", b"Alice, Bob\nCarol,,Dana\n")]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_names"], 4);
        assert_eq!(body["names"], json!(["Alice", "Bob", "Carol", "Dana"]));
    }

    #[actix_web::test]
    async fn test_upload_skips_other_fields() {
        let (status, body) = upload_parts(&[
            Part {
                name: "note",
                filename: None,
                body: b"ignored",
            },
            file_part("names.txt", b"Zed"),
        ])
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["names"], json!(["Zed"]));
    }

    #[actix_web::test]
    async fn test_upload_missing_file_part() {
        let (status, body) = upload_parts(&[Part {
            name: "other",
            filename: Some("names.txt"),
            body: b"Alice",
        }])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[actix_web::test]
    async fn test_upload_not_multipart() {
        let req = test::TestRequest::post()
            .uri("/upload")
            .set_json(json!({ "file": "names.txt" }));
        let (status, body) = call(ServerConfig::default(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[actix_web::test]
    async fn test_upload_empty_filename() {
        let (status, body) = upload_parts(&[file_part("", b"Alice")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file selected" }));
    }

    #[actix_web::test]
    async fn test_upload_file_field_without_filename() {
        let (status, body) = upload_parts(&[Part {
            name: "file",
            filename: None,
            body: b"Alice",
        }])
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[actix_web::test]
    async fn test_upload_rejects_other_extensions() {
        for filename in ["names.xlsx", "names.CSV", "names.TXT", "names"] {
            let (status, body) = upload_parts(&[file_part(filename, b"Alice")]).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", filename);
            assert_eq!(body, json!({ "error": "Only CSV and TXT files are allowed" }));
        }
    }

    #[actix_web::test]
    async fn test_upload_undecodable_bytes() {
        let (status, body) = upload_parts(&[file_part("names.txt", b"Al\xFF\xFEice")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Error processing file:"));
    }

    #[actix_web::test]
    async fn test_upload_blank_file() {
        let (status, body) = upload_parts(&[file_part("names.csv", b" , \n\n,")]).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No names found in file" }));
    }

    #[actix_web::test]
    async fn test_upload_over_limit() {
        let big = vec![b'a'; 64];
        let (status, body) =
            upload_with(config_with_limit(32), &[file_part("names.txt", &big)]).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body,
            json!({ "error": "File exceeds the maximum upload size of 32 bytes" })
        );
    }

    #[actix_web::test]
    async fn test_generate_selects_requested_count() {
        let names = json!(["Alice", "Bob", "Carol", "Dana"]);
        let (status, body) = generate_json(json!({ "names": names, "count": 2 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let selected = body["selected_names"].as_array().unwrap();
        assert_eq!(selected.len(), 2);
        assert_ne!(selected[0], selected[1]);
        assert!(selected.iter().all(|n| names.as_array().unwrap().contains(n)));
    }

    #[actix_web::test]
    async fn test_generate_accepts_numeric_string() {
        let (status, body) = generate_json(json!({ "names": ["A", "B", "C"], "count": "3" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected_names"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_generate_errors() {
        let cases = [
            (json!({ "names": ["A"] }), "Invalid request data"),
            (json!([1, 2]), "Invalid request data"),
            (json!([["A", "B"], 1]), "Invalid request data"),
            (json!({ "names": null, "count": 1 }), "Names list is empty or invalid"),
            (json!({ "names": [], "count": 1 }), "Names list is empty or invalid"),
            (json!({ "names": "A", "count": 1 }), "Names list is empty or invalid"),
            (json!({ "names": ["A"], "count": "one" }), "Invalid count value"),
            (json!({ "names": ["A"], "count": 1.5 }), "Invalid count value"),
            (json!({ "names": ["A"], "count": 0 }), "Count must be greater than 0"),
            (json!({ "names": ["A"], "count": -3 }), "Count must be greater than 0"),
            (
                json!({ "names": ["A", "B"], "count": 5 }),
                "Cannot select 5 names from 2 total names",
            ),
            (
                json!({ "names": ["A", "B"], "count": "99999999999999999999" }),
                "Cannot select 99999999999999999999 names from 2 total names",
            ),
            (
                json!({ "names": ["A", "B"], "count": 18446744073709551615u64 }),
                "Cannot select 18446744073709551615 names from 2 total names",
            ),
            (
                json!({ "names": ["A", "B"], "count": "-99999999999999999999" }),
                "Count must be greater than 0",
            ),
        ];

        for (request, expected) in cases {
            let (status, body) = generate_json(request.clone()).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", request);
            assert_eq!(body, json!({ "error": expected }), "{}", request);
        }
    }

    #[actix_web::test]
    async fn test_generate_malformed_json() {
        let req = test::TestRequest::post()
            .uri("/generate")
            .insert_header(ContentType::json())
            .set_payload("{\"names\": [");
        let (status, body) = call(ServerConfig::default(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid request data" }));
    }

    #[actix_web::test]
    async fn test_generate_body_over_limit() {
        let names: Vec<String> = (0..50).map(|i| format!("name-{}", i)).collect();
        let req = test::TestRequest::post()
            .uri("/generate")
            .set_json(json!({ "names": names, "count": 1 }));
        let (status, _body) = call(config_with_limit(64), req).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}

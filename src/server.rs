use crate::{
    app::Controller,
    config::Config,
    display,
    error::{PromptError, Result},
    models::PromptLanguage,
    upload::ImageFile,
};
use actix_web::{
    http::{header, StatusCode},
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub name: Option<String>,
}

async fn index(controller: web::Data<Controller>) -> HttpResponse {
    let view = controller.view().await;
    html(StatusCode::OK, display::render_page(&view))
}

async fn panel(controller: web::Data<Controller>) -> HttpResponse {
    render_panel(&controller, StatusCode::OK).await
}

async fn state(controller: web::Data<Controller>) -> HttpResponse {
    HttpResponse::Ok().json(controller.view().await)
}

/// Raw file body. `Content-Type` is the declared MIME and `?name=` the
/// original file name, both optional.
async fn upload_image(
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: std::result::Result<web::Bytes, actix_web::Error>,
    controller: web::Data<Controller>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            let status = e.as_response_error().status_code();
            let reason = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "image exceeds the upload size limit".to_string()
            } else {
                e.to_string()
            };
            controller
                .reject_upload(&PromptError::ImageReadError(reason))
                .await;
            return render_panel(&controller, status).await;
        }
    };

    let mut file = ImageFile::new(body.to_vec());
    if let Some(mime) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        file = file.with_mime(mime);
    }
    if let Some(name) = query.into_inner().name {
        file = file.with_name(name);
    }

    let status = match controller.upload(vec![file]).await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    render_panel(&controller, status).await
}

async fn generate(controller: web::Data<Controller>) -> HttpResponse {
    let status = match controller.generate().await {
        Ok(_) => StatusCode::OK,
        Err(PromptError::MissingImage) | Err(PromptError::InvalidImageData) => {
            StatusCode::BAD_REQUEST
        }
        Err(PromptError::GenerationInProgress) => StatusCode::CONFLICT,
        Err(_) => StatusCode::BAD_GATEWAY,
    };
    render_panel(&controller, status).await
}

async fn copy(path: web::Path<String>, controller: web::Data<Controller>) -> HttpResponse {
    let language: PromptLanguage = match path.into_inner().parse() {
        Ok(language) => language,
        Err(message) => return HttpResponse::NotFound().body(message),
    };

    let status = match controller.copy(language).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    render_panel(&controller, status).await
}

async fn render_panel(controller: &Controller, status: StatusCode) -> HttpResponse {
    let view = controller.view().await;
    html(status, display::render_panel(&view))
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/panel", web::get().to(panel))
        .route("/api/state", web::get().to(state))
        .route("/api/image", web::post().to(upload_image))
        .route("/api/generate", web::post().to(generate))
        .route("/api/copy/{lang}", web::post().to(copy));
}

pub async fn run(config: &Config, controller: Arc<Controller>) -> Result<()> {
    let data = web::Data::from(controller);
    let limit = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(limit))
            .configure(routes)
    })
    .bind(config.bind_addr())
    .map_err(|e| PromptError::ServerError(format!("{}: {}", config.bind_addr(), e)))?
    .run()
    .await
    .map_err(|e| PromptError::ServerError(e.to_string()))
}

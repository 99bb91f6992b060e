use crate::controllers::{AddMovieController, Controller, SignUpController};
use crate::http::{Request, Response};
use actix_web::{http::StatusCode, web, HttpResponse};
use serde_json::Value;

type SignUpData = web::Data<SignUpController>;
type AddMovieData = web::Data<AddMovieController>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(sign_up))
        .route("/movie-list/{id}", web::post().to(add_movie));
}

async fn dispatch<C: Controller>(controller: &C, request: Request) -> HttpResponse {
    into_http(controller.handle(request).await)
}

fn into_http(response: Response) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response.body)
}

async fn sign_up(controller: SignUpData, body: web::Json<Value>) -> HttpResponse {
    dispatch(controller.get_ref(), Request::from_json(body.into_inner())).await
}

async fn add_movie(controller: AddMovieData, id: web::Path<String>) -> HttpResponse {
    let request = Request::default().with_param("id", &id.into_inner());
    dispatch(controller.get_ref(), request).await
}

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{authz, models, routes};

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::health::health,
		routes::auth::register,
		routes::auth::login,
		routes::auth::me,
		routes::lessons::get_video_url,
		routes::lessons::lesson_video_url,
		routes::storage::download_signed_object
	),
	components(
		schemas(
			authz::Role,
			models::user::User,
			models::user::AuthResponse,
			models::user::LoginRequest,
			models::user::RegisterRequest,
			models::lesson::VideoUrlRequest,
			models::lesson::VideoUrlResponse,
			routes::health::HealthResponse
		)
	),
	modifiers(&BearerAuth),
	tags(
		(name = "Auth", description = "Authentication endpoints"),
		(name = "Lessons", description = "Lesson video access"),
		(name = "Storage", description = "Signed object downloads"),
		(name = "Health", description = "Liveness")
	)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
		let components = openapi.components.get_or_insert_with(Default::default);
		components.add_security_scheme(
			"bearerAuth",
			SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
		);
	}
}

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = ApiDoc::openapi();
	doc.servers = Some(vec![Server::new(format!("http://localhost:{port}"))]);
	Ok(doc)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> Router {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
		.try_it_out_enabled(true)
		.with_credentials(true)
		.persist_authorization(true);

	Router::new().merge(
		SwaggerUi::new("/docs")
			.url("/api-docs/openapi.json", doc)
			.config(swagger_config),
	)
}

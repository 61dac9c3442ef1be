use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::web::middlewares::AUTH_TOKEN;

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    AUTH_TOKEN,
                    "JWT token for current user",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::lectures::lectures_mark_complete_handler,
        crate::web::routes::lectures::lectures_mark_incomplete_handler,
        crate::web::routes::lectures::lectures_start_handler,
        crate::web::routes::lectures::lectures_progress_handler,
        crate::web::routes::courses::courses_progress_handler,
        crate::web::routes::progress::progress_list_handler,
    ),
    modifiers(&CookieAuthModifier),
    tags(
        (name = "lectures", description = "Lecture progress"),
        (name = "courses", description = "Course progress rollup"),
        (name = "progress", description = "Student dashboard"),
    ),
)]
pub struct ApiDoc;

use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::account::{AccountCreated, CreateAccountRequest},
    routes::{api, health},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        api::create_account,
        api::create_account_scoped,
    ),
    components(
        schemas(
            CreateAccountRequest,
            AccountCreated,
            health::HealthData,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Accounts", description = "Account-creation demo endpoints; nothing is persisted"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

//! Swagger UI mounting.
//!
//! The UI itself is the vendored Swagger UI bundle; this module only points
//! it at the mirrored document and applies the UI options.

use utoipa_swagger_ui::{Config, SwaggerUi};

use crate::config::DocsConfig;

/// Swagger UI served under `docs.ui_path`, loading the document from `docs.document_path`.
pub fn swagger_ui(docs: &DocsConfig) -> SwaggerUi {
    let config = Config::new([docs.document_path.clone()])
        .persist_authorization(docs.persist_authorization);

    SwaggerUi::new(docs.ui_path.clone()).config(config)
}

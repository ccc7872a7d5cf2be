//! Inspection tool launch URL

use dvir_addin_api::SessionContext;

/// Build the URL that opens the inspection tool for a session.
///
/// Session id and database are opaque host identifiers and go in as-is; the
/// user name is free text and is percent-encoded.
pub fn launch_url(base_url: &str, ctx: &SessionContext) -> String {
    format!(
        "{}?server={}&sessionId={}&database={}&userName={}",
        base_url,
        ctx.server,
        ctx.session.session_id,
        ctx.session.database,
        urlencoding::encode(&ctx.session.user_name),
    )
}

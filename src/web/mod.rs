//! Web layer - the HTML page and the form endpoints behind it.
//!
//! Every browser carries a device cookie. The [`SessionRegistry`] maps that
//! token to a running ledger; handlers translate form posts into
//! [`UserAction`](crate::controller::UserAction)s and render the ledger's
//! latest published state.

/// Request handlers
pub mod handlers;
/// Device token to ledger mapping
pub mod registry;
/// HTML rendering
pub mod view;

pub use registry::SessionRegistry;

use crate::errors::Result;
use crate::identity::IdentityProvider;
use crate::storage::ExpenseStore;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the application router.
pub fn router<S, P>(registry: Arc<SessionRegistry<S, P>>) -> Router
where
    S: ExpenseStore,
    P: IdentityProvider,
{
    Router::new()
        .route("/", get(handlers::index::<S, P>))
        .route("/health", get(|| async { "Expense tracker is running" }))
        .route("/expenses", post(handlers::submit::<S, P>))
        .route("/expenses/:id/edit", post(handlers::begin_edit::<S, P>))
        .route("/expenses/:id/delete", post(handlers::delete::<S, P>))
        .route("/budget", post(handlers::set_budget::<S, P>))
        .route("/message/dismiss", post(handlers::dismiss_message::<S, P>))
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// Serves the router on `bind_address` until the process stops.
pub async fn run_server<S, P>(bind_address: &str, registry: Arc<SessionRegistry<S, P>>) -> Result<()>
where
    S: ExpenseStore,
    P: IdentityProvider,
{
    let app = router(registry);
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

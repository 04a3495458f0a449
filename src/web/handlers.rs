//! Request handlers.
//!
//! `GET /` renders; every `POST` dispatches one action, waits for the ledger to
//! apply it, and redirects back to the page. When the action started a write,
//! the redirect also waits until the write's outcome is on display, so the page
//! the browser lands on shows the new list and message.

use crate::controller::UserAction;
use crate::core::form::FormInput;
use crate::identity::IdentityProvider;
use crate::storage::ExpenseStore;
use crate::web::{registry::SessionRegistry, view};
use axum::{
    Form,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Cookie carrying the device token
pub const DEVICE_COOKIE: &str = "expense_device";

/// Longest a `POST` holds its redirect waiting for a write to show up
const WRITE_SETTLE_LIMIT: Duration = Duration::from_secs(5);

/// Body of the budget form.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    /// Budget as typed
    #[serde(default)]
    pub budget: String,
}

/// `GET /`
pub async fn index<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
) -> Response {
    let (token, issued) = match device_token(&headers) {
        Some(token) => (token, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    };

    let ledger = registry.get_or_start(&token).await;
    let page = view::ledger_page(&ledger.current());

    if issued {
        debug!("Issued device cookie");
        ([(header::SET_COOKIE, device_cookie(&token))], page).into_response()
    } else {
        page.into_response()
    }
}

/// `POST /expenses`
pub async fn submit<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
    Form(input): Form<FormInput>,
) -> Response {
    dispatch(&registry, &headers, UserAction::Submit(input)).await
}

/// `POST /expenses/:id/edit`
pub async fn begin_edit<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    dispatch(&registry, &headers, UserAction::BeginEdit(id)).await
}

/// `POST /expenses/:id/delete`
pub async fn delete<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    dispatch(&registry, &headers, UserAction::Delete(id)).await
}

/// `POST /budget`
pub async fn set_budget<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
    Form(form): Form<BudgetForm>,
) -> Response {
    dispatch(&registry, &headers, UserAction::SetBudget(form.budget)).await
}

/// `POST /message/dismiss`
pub async fn dismiss_message<S: ExpenseStore, P: IdentityProvider>(
    State(registry): State<Arc<SessionRegistry<S, P>>>,
    headers: HeaderMap,
) -> Response {
    dispatch(&registry, &headers, UserAction::DismissMessage).await
}

async fn dispatch<S: ExpenseStore, P: IdentityProvider>(
    registry: &SessionRegistry<S, P>,
    headers: &HeaderMap,
    action: UserAction,
) -> Response {
    // Only the page starts ledgers; anything else is sent there first
    let ledger = match device_token(headers) {
        Some(token) => registry.get(&token).await,
        None => None,
    };
    let Some(ledger) = ledger else {
        debug!("Action without a running ledger, redirecting to the page");
        return Redirect::to("/").into_response();
    };

    let ticket = match ledger.dispatch(action).await {
        Ok(ticket) => ticket,
        Err(e) => {
            error!("Failed to dispatch action: {}", e);
            return (StatusCode::SERVICE_UNAVAILABLE, "Ledger unavailable").into_response();
        }
    };

    if let Some(ticket) = ticket {
        match tokio::time::timeout(WRITE_SETTLE_LIMIT, ledger.wait_for_write(ticket)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!("Ledger stopped while a write was pending: {}", e),
            Err(_) => warn!(?ticket, "Write not settled in time, redirecting anyway"),
        }
    }
    Redirect::to("/").into_response()
}

/// Reads a well-formed device token from the `Cookie` header.
fn device_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == DEVICE_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| is_device_token(token))
}

fn is_device_token(token: &str) -> bool {
    token.len() == 32 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

fn device_cookie(token: &str) -> String {
    format!("{DEVICE_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age=31536000")
}

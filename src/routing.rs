//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{adjust_account_endpoint, create_account_endpoint, get_wallet_page},
    analytics::get_analytics_page,
    auth::{
        auth_guard, get_log_in_page, get_log_out, get_register_page, post_log_in, register_user,
    },
    budget::get_budget_page,
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    savings::{get_savings_page, update_savings_endpoint},
    settings::{get_settings_page, update_settings},
    transaction::{
        clear_history_endpoint, create_transaction_endpoint, get_transactions_page,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN, get(get_log_in_page).post(post_log_in))
        .route(
            endpoints::REGISTER,
            get(get_register_page).post(register_user),
        )
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(
            endpoints::SETTINGS,
            get(get_settings_page).post(update_settings),
        )
        .route(endpoints::WALLET, get(get_wallet_page))
        .route(endpoints::BUDGET, get(get_budget_page))
        .route(endpoints::ANALYTICS, get(get_analytics_page))
        .route(endpoints::SAVINGS, get(get_savings_page))
        .route(endpoints::TRANSACTIONS, get(get_transactions_page))
        .route(endpoints::ADD_ACCOUNT, post(create_account_endpoint))
        .route(endpoints::ADJUST_ACCOUNT, post(adjust_account_endpoint))
        .route(
            endpoints::ADD_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(endpoints::UPDATE_SAVINGS, post(update_savings_endpoint))
        .route(endpoints::CLEAR_HISTORY, get(clear_history_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

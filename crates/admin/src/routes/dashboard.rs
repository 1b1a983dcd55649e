//! Dashboard route handlers.
//!
//! The dashboard compares the current month's revenue against a sales
//! goal the admin can adjust. The goal is the one numeric value the panel
//! persists client-side; it lives in the admin session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use miga_core::{OrderStatus, Price};

use crate::backend::Order;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::models::session_keys;
use crate::state::AppState;

/// Default monthly sales goal in whole pesos.
const DEFAULT_SALES_GOAL: i64 = 1_500_000;

/// Sales goal form data.
#[derive(Debug, Deserialize)]
pub struct GoalForm {
    pub goal: i64,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_name: String,
    pub revenue: String,
    pub goal: String,
    pub goal_value: i64,
    pub progress_percent: u32,
    pub order_count: usize,
    pub pending_count: usize,
}

/// Whether an order counts toward this month's revenue.
fn counts_for_month(order: &Order, year: i32, month: u32) -> bool {
    if order.status == OrderStatus::Cancelled {
        return false;
    }
    order
        .created_at
        .is_some_and(|d| d.year() == year && d.month() == month)
}

/// Display the dashboard.
#[instrument(skip(state, session, admin))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<DashboardTemplate> {
    let orders = state.backend().list_orders(None).await?;

    let today = Utc::now().date_naive();
    let month_orders: Vec<&Order> = orders
        .iter()
        .filter(|o| counts_for_month(o, today.year(), today.month()))
        .collect();

    let revenue: Price = month_orders.iter().map(|o| o.total).sum();
    let pending_count = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();

    let goal_value = session
        .get::<i64>(session_keys::SALES_GOAL)
        .await?
        .unwrap_or(DEFAULT_SALES_GOAL);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_percent = if goal_value > 0 {
        (revenue.as_pesos() * 100 / goal_value).clamp(0, 100) as u32
    } else {
        100
    };

    Ok(DashboardTemplate {
        admin_name: admin.name,
        revenue: revenue.to_string(),
        goal: Price::new(goal_value).to_string(),
        goal_value,
        progress_percent,
        order_count: month_orders.len(),
        pending_count,
    })
}

/// Set the monthly sales goal.
#[instrument(skip(session, _admin))]
pub async fn set_goal(
    session: Session,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<GoalForm>,
) -> Result<Redirect> {
    let goal = form.goal.max(0);
    session.insert(session_keys::SALES_GOAL, goal).await?;

    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use miga_core::OrderId;

    fn order(created: Option<&str>, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(1),
            user: "ana@example.com".into(),
            customer_name: "Ana".into(),
            phone: "987654321".into(),
            contact_email: "ana@example.com".into(),
            address: "Calle Falsa 123".into(),
            delivery_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            items: Vec::new(),
            total: Price::new(10000),
            status,
            created_at: created.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn test_counts_for_month_matches_year_and_month() {
        let o = order(Some("2025-06-03"), OrderStatus::Pending);
        assert!(counts_for_month(&o, 2025, 6));
        assert!(!counts_for_month(&o, 2025, 7));
        assert!(!counts_for_month(&o, 2024, 6));
    }

    #[test]
    fn test_cancelled_orders_do_not_count() {
        let o = order(Some("2025-06-03"), OrderStatus::Cancelled);
        assert!(!counts_for_month(&o, 2025, 6));
    }

    #[test]
    fn test_orders_without_creation_date_do_not_count() {
        let o = order(None, OrderStatus::Pending);
        assert!(!counts_for_month(&o, 2025, 6));
    }
}

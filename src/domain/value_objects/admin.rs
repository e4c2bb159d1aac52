use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{enums::order_statuses::OrderStatus, orders::OrderSummaryDto};

pub const RECENT_ORDER_DAYS: i64 = 7;
pub const REVENUE_WINDOW_DAYS: i64 = 30;
pub const RECENT_ORDER_LIMIT: i64 = 10;
pub const TOP_PRODUCT_LIMIT: i64 = 5;

/// Midnight UTC of the calendar day `days` before `now`. Dashboard windows
/// compare whole days, so every order placed on that day is included.
pub fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    (now.date_naive() - Duration::days(days))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopProduct {
    pub product_id: i64,
    pub product_name: String,
    pub quantity_sold: i64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PaymentMethodCounts {
    pub cod: i64,
    pub online: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub total_orders: i64,
    pub orders_by_status: Vec<StatusCount>,
    pub recent_orders_count: i64,
    pub total_revenue: BigDecimal,
    pub monthly_revenue: BigDecimal,
    pub payment_methods: PaymentMethodCounts,
    pub pending_refunds: i64,
    pub recent_orders: Vec<OrderSummaryDto>,
    pub top_products: Vec<TopProduct>,
}

/// Raw admin order-list query; empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminPaymentsQuery {
    pub method: Option<String>,
    pub status: Option<String>,
    pub refund: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StatusUpdatedDto {
    pub id: i64,
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_starts_at_midnight_of_the_boundary_day() {
        let now = Utc.with_ymd_and_hms(2025, 9, 30, 18, 0, 0).unwrap();
        assert_eq!(
            window_start(now, RECENT_ORDER_DAYS),
            Utc.with_ymd_and_hms(2025, 9, 23, 0, 0, 0).unwrap()
        );
        assert_eq!(
            window_start(now, REVENUE_WINDOW_DAYS),
            Utc.with_ymd_and_hms(2025, 8, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn early_order_on_the_boundary_day_is_inside_the_window() {
        let now = Utc.with_ymd_and_hms(2025, 9, 30, 18, 0, 0).unwrap();
        let since = window_start(now, RECENT_ORDER_DAYS);

        let early_on_boundary_day = Utc.with_ymd_and_hms(2025, 9, 23, 9, 0, 0).unwrap();
        let day_before = Utc.with_ymd_and_hms(2025, 9, 22, 23, 59, 59).unwrap();
        assert!(early_on_boundary_day >= since);
        assert!(day_before < since);
    }
}

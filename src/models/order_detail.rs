use crate::entities::order_detail_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderDetailRequest {
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderDetailRequest {
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order_id: Option<i32>,
    pub product_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: i64,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub price: f32,
    pub line_total: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<order_detail_entity::Model> for OrderDetailResponse {
    fn from(m: order_detail_entity::Model) -> Self {
        let line_total = m.line_total();
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            product_name: m.product_name,
            quantity: m.quantity,
            price: m.price,
            line_total,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub order_id: i32,
    pub line_count: u64,
    pub total_quantity: i64,
    pub total_amount: f64,
}

impl OrderSummaryResponse {
    pub fn from_lines(order_id: i32, lines: &[order_detail_entity::Model]) -> Self {
        Self {
            order_id,
            line_count: lines.len() as u64,
            total_quantity: lines.iter().map(|l| l.quantity as i64).sum(),
            total_amount: lines.iter().map(|l| l.line_total()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: f32) -> order_detail_entity::Model {
        order_detail_entity::Model {
            id: 1,
            order_id: 7,
            product_id: 3,
            product_name: "Beras".into(),
            quantity,
            price,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_from_lines() {
        let summary = OrderSummaryResponse::from_lines(7, &[line(2, 1.5), line(3, 2.0)]);
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.total_quantity, 5);
        assert!((summary.total_amount - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_empty_order() {
        let summary = OrderSummaryResponse::from_lines(7, &[]);
        assert_eq!(summary.line_count, 0);
        assert_eq!(summary.total_quantity, 0);
        assert_eq!(summary.total_amount, 0.0);
    }

    #[test]
    fn test_response_carries_line_total() {
        let resp = OrderDetailResponse::from(line(4, 0.25));
        assert_eq!(resp.line_total, 1.0);
    }
}

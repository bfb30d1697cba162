use crate::entities::order_detail_entity as order_detail;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct OrderDetailService {
    pool: DatabaseConnection,
}

fn validate_quantity(quantity: i32) -> AppResult<i32> {
    if quantity <= 0 {
        return Err(AppError::ValidationError(
            "quantity must be positive".to_string(),
        ));
    }
    Ok(quantity)
}

fn validate_price(price: f32) -> AppResult<f32> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::ValidationError(
            "price must be a finite, non-negative number".to_string(),
        ));
    }
    Ok(price)
}

impl OrderDetailService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateOrderDetailRequest) -> AppResult<OrderDetailResponse> {
        let product_name = require_text("product_name", &request.product_name)?;
        let quantity = validate_quantity(request.quantity)?;
        let price = validate_price(request.price)?;

        let now = Utc::now();
        let line = order_detail::ActiveModel {
            order_id: Set(request.order_id),
            product_id: Set(request.product_id),
            product_name: Set(product_name),
            quantity: Set(quantity),
            price: Set(price),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(line.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<OrderDetailResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn list(
        &self,
        query: &OrderDetailQuery,
    ) -> AppResult<PaginatedResponse<OrderDetailResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = order_detail::Entity::find();
        if let Some(order_id) = query.order_id {
            base_query = base_query.filter(order_detail::Column::OrderId.eq(order_id));
        }
        if let Some(product_id) = query.product_id {
            base_query = base_query.filter(order_detail::Column::ProductId.eq(product_id));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_asc(order_detail::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateOrderDetailRequest,
    ) -> AppResult<OrderDetailResponse> {
        let line = self.find(id).await?;
        let mut am = line.into_active_model();

        if let Some(name) = request.product_name {
            am.product_name = Set(require_text("product_name", &name)?);
        }
        if let Some(quantity) = request.quantity {
            am.quantity = Set(validate_quantity(quantity)?);
        }
        if let Some(price) = request.price {
            am.price = Set(validate_price(price)?);
        }
        am.updated_at = Set(Some(Utc::now()));

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = order_detail::Entity::delete_by_id(id)
            .exec(&self.pool)
            .await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("order detail {id}")));
        }
        Ok(())
    }

    /// 汇总某个订单的所有明细; 没有明细的订单返回全 0
    pub async fn order_summary(&self, order_id: i32) -> AppResult<OrderSummaryResponse> {
        let lines = order_detail::Entity::find()
            .filter(order_detail::Column::OrderId.eq(order_id))
            .all(&self.pool)
            .await?;
        Ok(OrderSummaryResponse::from_lines(order_id, &lines))
    }

    async fn find(&self, id: i64) -> AppResult<order_detail::Model> {
        order_detail::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("order detail {id}")))
    }
}

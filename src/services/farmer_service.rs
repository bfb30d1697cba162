use crate::entities::farmer_entity as farmers;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{optional_text, require_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct FarmerService {
    pool: DatabaseConnection,
}

impl FarmerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateFarmerRequest) -> AppResult<FarmerResponse> {
        let now = Utc::now();
        let farmer = farmers::ActiveModel {
            name: Set(require_text("name", &request.name)?),
            gender: Set(require_text("gender", &request.gender)?),
            location: Set(require_text("location", &request.location)?),
            crop: Set(require_text("crop", &request.crop)?),
            contact: Set(require_text("contact", &request.contact)?),
            profile_picture: Set(optional_text(
                "profile_picture",
                request.profile_picture.as_deref(),
            )?),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(farmer.into())
    }

    pub async fn get(&self, id: i32) -> AppResult<FarmerResponse> {
        Ok(self.find(id).await?.into())
    }

    /// 按作物/地区筛选 (精确匹配)
    pub async fn list(&self, query: &FarmerQuery) -> AppResult<PaginatedResponse<FarmerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = farmers::Entity::find();
        if let Some(crop) = query.crop.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            base_query = base_query.filter(farmers::Column::Crop.eq(crop));
        }
        if let Some(location) = query
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            base_query = base_query.filter(farmers::Column::Location.eq(location));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_asc(farmers::Column::Id)
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

    pub async fn update(&self, id: i32, request: UpdateFarmerRequest) -> AppResult<FarmerResponse> {
        let farmer = self.find(id).await?;
        let mut am = farmer.into_active_model();

        if let Some(v) = request.name {
            am.name = Set(require_text("name", &v)?);
        }
        if let Some(v) = request.gender {
            am.gender = Set(require_text("gender", &v)?);
        }
        if let Some(v) = request.location {
            am.location = Set(require_text("location", &v)?);
        }
        if let Some(v) = request.crop {
            am.crop = Set(require_text("crop", &v)?);
        }
        if let Some(v) = request.contact {
            am.contact = Set(require_text("contact", &v)?);
        }
        if let Some(v) = request.profile_picture {
            am.profile_picture = Set(optional_text("profile_picture", Some(&v))?);
        }
        am.updated_at = Set(Some(Utc::now()));

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = farmers::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("farmer {id}")));
        }
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<farmers::Model> {
        farmers::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("farmer {id}")))
    }
}

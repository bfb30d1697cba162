use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 户主记录, 每张家庭卡 (Kartu Keluarga) 一条
/// - no_kk 唯一
/// - id_user 删除用户时级联删除
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "kepalakeluargas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub id_user: i32,
    #[sea_orm(unique)]
    pub no_kk: String,
    pub nama_kk: String,
    pub alamat: String,
    pub kode_pos: String,
    pub status_rumah: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::IdUser",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

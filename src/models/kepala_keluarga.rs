use crate::entities::kepala_keluarga_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateKepalaKeluargaRequest {
    pub id_user: i32,
    /// 16 位家庭卡号
    pub no_kk: String,
    pub nama_kk: String,
    pub alamat: String,
    /// 5 位邮编
    pub kode_pos: String,
    pub status_rumah: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateKepalaKeluargaRequest {
    pub no_kk: Option<String>,
    pub nama_kk: Option<String>,
    pub alamat: Option<String>,
    pub kode_pos: Option<String>,
    pub status_rumah: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KepalaKeluargaQuery {
    pub id_user: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KepalaKeluargaResponse {
    pub id: i32,
    pub id_user: i32,
    pub no_kk: String,
    pub nama_kk: String,
    pub alamat: String,
    pub kode_pos: String,
    pub status_rumah: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<kepala_keluarga_entity::Model> for KepalaKeluargaResponse {
    fn from(m: kepala_keluarga_entity::Model) -> Self {
        Self {
            id: m.id,
            id_user: m.id_user,
            no_kk: m.no_kk,
            nama_kk: m.nama_kk,
            alamat: m.alamat,
            kode_pos: m.kode_pos,
            status_rumah: m.status_rumah,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

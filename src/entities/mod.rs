pub mod farmers;
pub mod kepalakeluargas;
pub mod order_detail;
pub mod users;

pub use farmers as farmer_entity;
pub use kepalakeluargas as kepala_keluarga_entity;
pub use order_detail as order_detail_entity;
pub use users as user_entity;

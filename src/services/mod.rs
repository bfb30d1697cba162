pub mod bench_service;
pub mod farmer_service;
pub mod kepala_keluarga_service;
pub mod order_detail_service;
pub mod user_service;

pub use bench_service::*;
pub use farmer_service::*;
pub use kepala_keluarga_service::*;
pub use order_detail_service::*;
pub use user_service::*;

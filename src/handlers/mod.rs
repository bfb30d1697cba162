pub mod bench;
pub mod farmer;
pub mod kepala_keluarga;
pub mod order_detail;
pub mod user;

pub use bench::bench_config;
pub use farmer::farmer_config;
pub use kepala_keluarga::kepala_keluarga_config;
pub use order_detail::order_detail_config;
pub use user::user_config;

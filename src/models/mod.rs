pub mod common;
pub mod farmer;
pub mod kepala_keluarga;
pub mod order_detail;
pub mod pagination;
pub mod user;

pub use common::*;
pub use farmer::*;
pub use kepala_keluarga::*;
pub use order_detail::*;
pub use pagination::*;
pub use user::*;

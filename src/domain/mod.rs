//! Wire-level data structures implementing [`StoreEntity`](resource_store::StoreEntity).

pub mod brand;
pub mod cart;
pub mod category;
pub mod image;
pub mod order;
pub mod product;
pub mod shipping;
pub mod showroom;
pub mod user;

pub use brand::*;
pub use cart::*;
pub use category::*;
pub use image::*;
pub use order::*;
pub use product::*;
pub use shipping::*;
pub use showroom::*;
pub use user::*;

pub mod schema;
pub mod table;
pub mod normalize;

pub use schema::*;
pub use table::*;
pub use normalize::*;

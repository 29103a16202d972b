pub mod food;
pub mod health;
pub mod order;
pub mod restaurant;
pub mod user;

pub use food::*;
pub use health::*;
pub use order::*;
pub use restaurant::*;
pub use user::*;

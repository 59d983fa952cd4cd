pub mod discount;
pub mod movie;
pub mod reservation;
pub mod showing;

pub use discount::*;
pub use movie::*;
pub use reservation::*;
pub use showing::*;

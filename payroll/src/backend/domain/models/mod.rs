pub mod appointment;
pub mod pay_period;
pub mod pay_scale;

pub use appointment::*;
pub use pay_period::*;
pub use pay_scale::*;

pub mod health;
pub mod hostname;
pub mod logging;

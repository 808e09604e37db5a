pub mod cargo;
pub mod route;
pub mod training;
pub mod user;
pub mod vehicle;

pub mod jwt_service;
pub mod policy_service;

//! HTTP handlers

pub mod root;
pub mod health;
pub mod model_info;
pub mod predict;

//! Scoring pipeline: input validation, model invocation, decisioning

pub mod decision;
pub mod scorer;
pub mod validate;

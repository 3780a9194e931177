//! Infrastructure layer

pub mod sparkpost;

//! Small helpers shared by services and controllers.

pub mod html;
pub mod parse;
pub mod password;
pub mod random;
pub mod validate;

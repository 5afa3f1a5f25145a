pub mod endpoints;
pub mod helpers;

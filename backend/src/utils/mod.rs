//! Small building blocks shared by the services and handlers.

pub mod cookie;
pub mod jwt;
pub mod password;

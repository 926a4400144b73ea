//! External service clients used by the admin backend.

pub mod images;

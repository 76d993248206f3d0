pub mod access;
pub mod guard;

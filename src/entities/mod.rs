//! Declarative macros for shapes and entities

pub mod macros;

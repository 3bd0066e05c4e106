//! Storage for companies and employees

pub mod in_memory;
pub mod repository;
pub mod seed;

pub use in_memory::InMemoryCompanyRepository;
pub use repository::CompanyRepository;

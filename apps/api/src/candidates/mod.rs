// Candidate Record Service
// Validation runs before every write; the store only sees schema-conforming documents.

pub mod handlers;
pub mod models;
pub mod schema;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod test_support;

pub mod summary;

pub use summary::generate_summary;

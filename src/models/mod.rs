pub mod admission;
pub mod patient;
pub mod user_spec;

pub use admission::Admission;
pub use patient::Patient;
pub use user_spec::UserSpec;

pub mod version;

pub use version::VersionResponse;

//! Domain ports for the hexagonal boundary.

mod user_directory;

#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;

//! Kit catalog management: kit metadata parsing, kit and Cordova CLI version
//! resolution, and the process-scoped catalog cache.

pub mod cache;
pub mod metadata;
pub mod registry;
pub mod version;

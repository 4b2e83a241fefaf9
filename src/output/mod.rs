//! Output module
//!
//! Writes the fetched rows to a gzip-compressed local artifact (csv or
//! json) and uploads that artifact to S3 under a key equal to its filename.

mod cloud;
mod writer;

pub use cloud::ObjectUploader;
pub use writer::{write_artifact, Artifact};

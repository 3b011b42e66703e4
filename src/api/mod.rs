//! Imgflip API
//!
//! Template catalog and caption requests.

mod error;
pub mod imgflip;

pub use error::ApiError;
pub use imgflip::{Credentials, ImgflipClient, MemeTemplate, DEFAULT_API_BASE};

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod id;
mod time;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use id::new_record_id;
pub use time::epoch_millis_now;

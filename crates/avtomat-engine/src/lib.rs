#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod engine;
mod step;

pub use engine::ExecutionEngine;
pub use step::{CompletionStep, FixedDelayStep};

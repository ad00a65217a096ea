//! Channel and video lookup: input resolution, upload collection and the two
//! request-level services built on them.

pub mod channel_info;
pub mod collector;
pub mod resolver;
pub mod videos;

//! Tweet queue domain - sheet layout, operations, and sample data

pub mod seed;
pub mod sheet;
pub mod tweets;

pub use tweets::TweetGateway;

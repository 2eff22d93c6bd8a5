pub mod client;
pub mod report;
pub mod schema;
pub mod session;
pub mod tracker;

pub use crate::domain::model::{MatchEntry, MatchRequest, MatchResponse};
pub use crate::domain::ports::{ConfigProvider, MatchService};
pub use crate::utils::error::Result;

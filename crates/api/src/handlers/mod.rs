pub mod maintenance;
pub mod search;
pub mod video;

mod comment;
mod favorite;
mod offer;
mod report;
mod user;

pub use comment::*;
pub use favorite::*;
pub use offer::*;
pub use report::*;
pub use user::*;

pub mod list_refresh;

pub use list_refresh::ListRefreshJob;

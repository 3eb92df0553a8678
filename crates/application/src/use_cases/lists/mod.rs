pub mod reload_lists;

pub use reload_lists::{ListCounts, ReloadDomainListsUseCase};

pub mod dns;
pub mod lists;

pub use dns::HandleDnsQueryUseCase;
pub use lists::{ListCounts, ReloadDomainListsUseCase};

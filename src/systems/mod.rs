pub mod sdk;
pub mod resource;
pub mod modifier;
pub mod formula;
pub mod requirement;
pub mod purchasable;
pub mod tick;
#[cfg(feature="system-conversion")]     pub mod conversion;
#[cfg(feature="system-reset_prestige")] pub mod reset_prestige;
#[cfg(feature="system-achievements")]   pub mod achievement;
#[cfg(feature="system-auto_purchase")]  pub mod auto_purchase;

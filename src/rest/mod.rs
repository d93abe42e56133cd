//! lemon.markets REST request helper.
//!
//! [`RestClient`] issues authorized GET requests on behalf of an
//! [`Account`](crate::Account) and walks paged collections. Resource types such as
//! [`Space`](crate::Space) and [`State`](crate::State) are built on top of it.

mod client;
pub mod endpoints;
mod page;

pub use client::{RestClient, RestClientBuilder};
pub use page::Page;

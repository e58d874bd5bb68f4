//! Stored document shapes for every seeded collection.
//!
//! These are the shapes the pipelines write to the document store, with the
//! exact field names the storefront reads back (`camelCase`, `USD`-suffixed
//! money fields). Raw seed-input shapes live in the pipeline crate; this
//! module only knows the validated, fully derived result.

pub mod address;
pub mod discount;
pub mod order;
pub mod product;
pub mod ticket;
pub mod user;

pub use address::{Address, AddressKind};
pub use discount::Discount;
pub use order::{CustomerSnapshot, LineItem, Order, OrderItem};
pub use product::Product;
pub use ticket::{SupportTicket, TicketReply};
pub use user::User;

//! `fashionista-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the product attributes a pricing request carries, the closed category set,
//! and the domain error model.

pub mod category;
pub mod error;
pub mod product;

pub use category::{Category, ProductCategory};
pub use error::{DomainError, DomainResult};
pub use product::{CompetitorPrices, ProductInput};

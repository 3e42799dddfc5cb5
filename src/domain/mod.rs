//! Domain records and the order workflow's pure logic.

pub mod catalog;
pub mod identity;
pub mod order;
pub mod pricing;

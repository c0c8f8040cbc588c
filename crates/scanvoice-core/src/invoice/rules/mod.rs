//! Rule-based field extractors.
//!
//! Each field is a prioritized cascade of independent matchers evaluated
//! in sequence with early exit on the first success. Priority order is
//! part of the contract: sub-total before total before MRP, specific name
//! labels before the bare "name" label, exact company suffix before the
//! loose fallback.

pub mod amounts;
pub mod dates;
pub mod names;
pub mod patterns;

pub use amounts::extract_total_amount;
pub use dates::extract_invoice_date;
pub use names::{extract_account_name, extract_company_name};

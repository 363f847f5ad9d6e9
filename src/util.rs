use std::collections::BTreeMap;

use thiserror::Error;

pub type Outcome = u128;
pub type Cell = i32;
pub type Map<T> = BTreeMap<T, Outcome>;
pub type Entry<'a, T> = std::collections::btree_map::Entry<'a, T, Outcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("overflow in outcome counts")]
pub struct OverflowError;

pub type OverflowResult<T> = Result<T, OverflowError>;

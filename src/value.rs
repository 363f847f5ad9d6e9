use std::cmp::Ordering;
use std::fmt::Debug;

pub type Points = i32;

pub trait Value: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + PartialOrd + Ord {}

pub trait ComputableValue: Value {
    fn compute(&self) -> f64;
}

impl<T> Value for T where T: Sized + Send + Sync + Debug + Clone + PartialEq + Eq + PartialEq + Ord {}

impl ComputableValue for Points {
    fn compute(&self) -> f64 {
        f64::from(*self)
    }
}

impl ComputableValue for Ordering {
    fn compute(&self) -> f64 {
        match self {
            Ordering::Less => -1.0,
            Ordering::Equal => 0.0,
            Ordering::Greater => 1.0,
        }
    }
}

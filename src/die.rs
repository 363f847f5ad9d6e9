use std::iter::Zip;
use std::slice;

use itertools::Itertools;
use num::integer::gcd;
use rand::{Rng, RngCore};

use crate::util::{Entry, Map, Outcome, OverflowError, OverflowResult};
use crate::value::{ComputableValue, Points, Value};

pub type Iter<'a, T> = Zip<slice::Iter<'a, T>, slice::Iter<'a, Outcome>>;

/// Finite discrete distribution with exact integer outcome counts.
///
/// Values are kept sorted; `outcomes[i] / denom` is the probability of `values[i]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Die<T = Points>
where
    T: Value,
{
    denom: Outcome,
    outcomes: Vec<Outcome>,
    values: Vec<T>,
}

impl Die {
    #[must_use]
    pub fn numeric(sides: Points) -> Self {
        Die::uniform(1..=sides)
    }
}

impl<T> Die<T>
where
    T: Value,
{
    #[must_use]
    pub fn scalar(value: T) -> Self {
        Self {
            values: vec![value],
            outcomes: vec![1],
            denom: 1,
        }
    }

    #[must_use]
    pub fn uniform<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<_> = values.into_iter().sorted().collect();
        let n = values.len();
        Self {
            values,
            outcomes: vec![1; n],
            denom: n as Outcome,
        }
    }

    /// Die over `values`, merging repeats into outcome counts.
    #[must_use]
    pub fn tallied<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut map = Map::new();
        let mut denom: Outcome = 0;
        for value in values {
            tally(&mut map, value, 1);
            denom += 1;
        }
        Die::new(map, denom)
    }

    #[must_use]
    pub fn denom(&self) -> Outcome {
        self.denom
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter().zip(self.outcomes.iter())
    }

    /// Number of outcomes (out of `denom`) whose value satisfies `predicate`.
    #[must_use]
    pub fn count<P>(&self, predicate: P) -> Outcome
    where
        P: Fn(&T) -> bool,
    {
        self.iter()
            .filter(|(v, _)| predicate(*v))
            .map(|(_, o)| *o)
            .sum()
    }

    #[must_use]
    pub fn chance<P>(&self, predicate: P) -> f64
    where
        P: Fn(&T) -> bool,
    {
        if self.denom == 0 {
            return 0.0;
        }
        self.count(predicate) as f64 / self.denom as f64
    }

    #[must_use]
    pub fn sample_rng<G>(&self, rng: &mut G) -> &T
    where
        G: RngCore,
    {
        let x = rng.gen_range(0..self.denom);
        let mut pos = 0;
        for (v, o) in self.iter() {
            pos += o;
            if x < pos {
                return v;
            }
        }
        unreachable!()
    }

    /// Joint outcome of two independent dice mapped through `f`.
    pub fn apply_two<T2, O, F>(&self, d2: &Die<T2>, f: F) -> OverflowResult<Die<O>>
    where
        T2: Value,
        O: Value,
        F: Fn(&T, &T2) -> O,
    {
        let denom = self.denom.checked_mul(d2.denom).ok_or(OverflowError)?;
        let mut map = Map::new();

        for (v1, o1) in self.iter() {
            for (v2, o2) in d2.iter() {
                tally(&mut map, f(v1, v2), o1 * o2);
            }
        }

        Ok(Die::new(map, denom))
    }

    fn new(map: Map<T>, mut denom: Outcome) -> Self {
        let mut values = Vec::with_capacity(map.len());
        let mut outcomes = Vec::with_capacity(map.len());
        let mut acc = denom;
        for (value, outcome) in map {
            acc = gcd(acc, outcome);
            values.push(value);
            outcomes.push(outcome);
        }
        if acc > 1 {
            outcomes.iter_mut().for_each(|x| *x /= acc);
            denom /= acc;
        }
        Self {
            denom,
            values,
            outcomes,
        }
    }
}

impl<T> Die<T>
where
    T: ComputableValue,
{
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.iter().fold(0.0, |acc, (value, outcome)| {
            acc + value.compute() * (*outcome as f64) / (self.denom as f64)
        })
    }
}

#[inline]
fn tally<T>(map: &mut Map<T>, value: T, outcome: Outcome)
where
    T: Value,
{
    match map.entry(value) {
        Entry::Vacant(e) => {
            e.insert(outcome);
        }
        Entry::Occupied(mut e) => {
            *e.get_mut() += outcome;
        }
    }
}

use itertools::iproduct;
use once_cell::sync::Lazy;

use crate::die::Die;

pub static D3: Lazy<Die> = Lazy::new(|| Die::numeric(3));
pub static ROLL: Lazy<Die> =
    Lazy::new(|| Die::tallied(iproduct!(D3.values(), D3.values()).map(|(x, y)| x + y)));

pub static SHALLOW: Lazy<Die> = Lazy::new(|| Die::uniform(0..=3));
pub static MIDDLE: Lazy<Die> = Lazy::new(|| Die::uniform(4..=7));
pub static DEEP: Lazy<Die> = Lazy::new(|| Die::uniform(8..=11));
pub static ABYSS: Lazy<Die> = Lazy::new(|| Die::uniform(11..=14));

/// Sum of two three-sided dice, the movement roll.
pub fn roll() -> &'static Die {
    &ROLL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_is_two_d3() {
        assert_eq!(roll().values(), &[2, 3, 4, 5, 6]);
        assert_eq!(roll().outcomes(), &[1, 2, 3, 2, 1]);
        assert_eq!(roll().denom(), 9);
        assert_eq!(roll().chance(|&x| x == 4), 3.0 / 9.0);
    }

    #[test]
    fn d3_faces() {
        assert_eq!(D3.values(), &[1, 2, 3]);
    }

    #[test]
    fn tier_dice_have_four_faces() {
        for die in [&*SHALLOW, &*MIDDLE, &*DEEP, &*ABYSS] {
            assert_eq!(die.values().len(), 4);
            assert_eq!(die.denom(), 4);
        }
        assert_eq!(ABYSS.values(), &[11, 12, 13, 14]);
    }
}

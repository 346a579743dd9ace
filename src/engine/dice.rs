// Sample resolvers: greetings, quotes and dice rolls

//! Pure helpers behind the sample queries on the schema. Every function
//! takes the random source as a parameter so tests can seed it.

use rand::Rng;

use crate::{Error, Result};

pub const GREETING: &str = "Hello World!";

pub const QUOTES: [&str; 2] = ["Take it easy", "Salvation lies within"];

pub const DEFAULT_SIDES: i32 = 6;

/// Upper bound on dice per request
pub const MAX_DICE: i32 = 10_000;

/// One of the two quotes, each with probability one half
pub fn quote_of_the_day<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    if rng.gen_bool(0.5) {
        QUOTES[0]
    } else {
        QUOTES[1]
    }
}

/// Uniform float in `[0, 1)`
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Roll `num_dice` dice with `num_sides` sides each
///
/// `None` and `Some(0)` both mean six sides. Zero dice rolls nothing.
///
/// ## Errors
/// - `InvalidInput` when `num_dice` is negative or above `MAX_DICE`
/// - `InvalidInput` when `num_sides` is negative
pub fn roll_dice<R: Rng + ?Sized>(
    rng: &mut R,
    num_dice: i32,
    num_sides: Option<i32>,
) -> Result<Vec<i32>> {
    let sides = match num_sides {
        None | Some(0) => DEFAULT_SIDES,
        Some(sides) if sides < 0 => {
            return Err(Error::InvalidInput(format!(
                "numSides must not be negative, got {}",
                sides
            )))
        }
        Some(sides) => sides,
    };
    if num_dice < 0 {
        return Err(Error::InvalidInput(format!(
            "numDice must not be negative, got {}",
            num_dice
        )));
    }
    if num_dice > MAX_DICE {
        return Err(Error::InvalidInput(format!(
            "numDice must be at most {}, got {}",
            MAX_DICE, num_dice
        )));
    }

    Ok((0..num_dice).map(|_| rng.gen_range(1..=sides)).collect())
}

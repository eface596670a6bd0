use crate::engine::sampler::weighted_sample;
use lazy_static::lazy_static;
use rand::Rng;
use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;

/// Keyboard rows; the four shifted rows sit positionally under the four
/// unshifted ones.
const ROWS: [&str; 8] = [
    "1234567890",
    "qwertyuiop",
    "asdfghjkl;",
    "zxcvbnm,./",
    "!@#$%^&*()",
    "QWERTYUIOP",
    "ASDFGHJKL:",
    "ZXCVBNM<>?",
];

const ROWS_PER_LAYER: usize = 4;

lazy_static! {
    static ref KEY_POSITIONS: HashMap<char, (usize, usize)> = {
        let mut positions = HashMap::new();
        for (row, keys) in ROWS.iter().enumerate() {
            for (col, key) in keys.chars().enumerate() {
                positions.entry(key).or_insert((row, col));
            }
        }
        positions
    };
}

fn key_at(row: usize, col: usize) -> char {
    ROWS[row].as_bytes()[col] as char
}

/// Weighted neighbours of `c`: orthogonal keys weigh 1, diagonal keys
/// `sqrt(2)/2`. A key missing from the layout has no neighbours.
pub fn neighbors(c: char) -> Vec<(char, f64)> {
    let Some(&(row, col)) = KEY_POSITIONS.get(&c) else {
        return Vec::new();
    };

    let left = col > 0;
    let right = col + 1 < ROWS[row].len();
    let up = row % ROWS_PER_LAYER != 0;
    let down = row % ROWS_PER_LAYER != ROWS_PER_LAYER - 1;

    let mut choices = Vec::with_capacity(8);
    if left {
        choices.push((key_at(row, col - 1), 1.0));
        if up {
            choices.push((key_at(row - 1, col - 1), FRAC_1_SQRT_2));
        }
        if down {
            choices.push((key_at(row + 1, col - 1), FRAC_1_SQRT_2));
        }
    }
    if right {
        choices.push((key_at(row, col + 1), 1.0));
        if up {
            choices.push((key_at(row - 1, col + 1), FRAC_1_SQRT_2));
        }
        if down {
            choices.push((key_at(row + 1, col + 1), FRAC_1_SQRT_2));
        }
    }
    if up {
        choices.push((key_at(row - 1, col), 1.0));
    }
    if down {
        choices.push((key_at(row + 1, col), 1.0));
    }

    choices
}

/// A key adjacent to `c`, or `c` itself when it is not on the keyboard.
pub fn neighbor_of<R: Rng + ?Sized>(c: char, rng: &mut R) -> char {
    weighted_sample(&neighbors(c), rng).unwrap_or(c)
}

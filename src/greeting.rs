//! Random new-year wishes.

use rand::Rng;

/// Every wish the greeting button can show.
pub const GREETINGS: [&str; 10] = [
    "May 2026 bring boundless joy, incredible adventures, and dreams that soar higher than the stars! ✨",
    "May this New Year paint your life with vibrant colors of happiness, success, and love! 🎨",
    "Embrace 2026 with open arms! May every moment sparkle with opportunity and every day overflow with blessings! 🌟",
    "May 2026 be your masterpiece – filled with laughter, growth, and unforgettable memories! 🎉",
    "Step into 2026 with confidence! May your path be illuminated with prosperity, health, and endless possibilities! 💫",
    "Wishing you a year filled with magical moments, beautiful surprises, and countless reasons to smile! 🌈",
    "May 2026 bring you closer to your dreams and fill your heart with peace, love, and contentment! 💖",
    "Here is to new beginnings, fresh opportunities, and a year of unlimited potential! 🚀",
    "May every sunrise bring hope, every sunset bring peace, and every moment bring happiness in 2026! 🌅",
    "Wishing you twelve months of success, 52 weeks of laughter, 365 days of joy, and endless moments of love! 🎊",
];

/// Pick one wish uniformly at random.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    GREETINGS[rng.gen_range(0..GREETINGS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_returns_known_wish() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            assert!(GREETINGS.contains(&pick(&mut rng)));
        }
    }

    #[test]
    fn test_pick_varies() {
        let mut rng = SmallRng::seed_from_u64(11);
        let seen: HashSet<&str> = (0..200).map(|_| pick(&mut rng)).collect();
        assert_eq!(seen.len(), GREETINGS.len());
    }
}

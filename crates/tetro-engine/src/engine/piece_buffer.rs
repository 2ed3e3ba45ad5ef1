use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Random number generator owned by a game session.
///
/// Every random draw of a session (bag shuffles, clutter placement, garbage
/// gaps) goes through one instance, so a [`GameSeed`] reproduces the whole run.
pub type GameRng = Pcg32;

/// The piece supply: a FIFO queue refilled with shuffled 7-bags.
///
/// # 7-Bag System
///
/// Whenever 7 or fewer pieces remain, freshly shuffled permutations of all
/// seven kinds are appended before drawing. Every aligned run of 7 draws
/// therefore contains each kind exactly once, and at least 7 pieces stay
/// visible for the preview after every draw.
///
/// The buffer does not own its randomness; the session passes its [`GameRng`]
/// in on every draw.
///
/// # Example
///
/// ```
/// use tetro_engine::{GameSeed, PieceBuffer};
///
/// let mut rng = GameSeed::from(42).rng();
/// let mut buffer = PieceBuffer::new();
///
/// let first = buffer.pop_next(&mut rng);
/// let upcoming: Vec<_> = buffer.next_pieces().take(5).collect();
/// assert_eq!(upcoming.len(), 5);
/// assert!(!upcoming.contains(&first));
/// ```
#[derive(Debug, Default, Clone)]
pub struct PieceBuffer {
    queue: VecDeque<PieceKind>,
}

impl PieceBuffer {
    /// Creates an empty buffer; the first draw fills it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
        }
    }

    fn refill(&mut self, rng: &mut GameRng) {
        while self.queue.len() <= PieceKind::LEN {
            let mut bag = PieceKind::ALL;
            bag.shuffle(rng);
            self.queue.extend(bag);
        }
    }

    /// Draws the next piece, refilling the queue first when it runs low.
    ///
    /// # Panics
    ///
    /// Never in practice: the queue holds at least 8 pieces before the draw.
    pub fn pop_next(&mut self, rng: &mut GameRng) -> PieceKind {
        self.refill(rng);
        self.queue
            .pop_front()
            .expect("piece queue is refilled before every draw")
    }

    /// Returns an iterator over the queued pieces, next piece first.
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Seed for a reproducible game session.
///
/// A 128-bit seed for [`GameRng`]. Two sessions created with the same seed and
/// fed the same commands produce identical games.
///
/// Text forms are hexadecimal: serde uses exactly 32 digits, while
/// [`FromStr`] also accepts shorter input so a typed seed like `"c0ffee"` works.
///
/// # Example
///
/// ```
/// use tetro_engine::GameSeed;
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let parsed: GameSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    /// Creates the generator this seed describes.
    #[must_use]
    pub fn rng(self) -> GameRng {
        Pcg32::from_seed(self.0)
    }
}

impl From<u64> for GameSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 1-32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for GameSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.is_empty() || s.len() > 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

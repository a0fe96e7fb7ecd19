mod filter;
mod format;
mod math;
mod outcome;
mod proposal;
mod serde_dec;

pub use {filter::*, format::*, math::*, outcome::*, proposal::*};

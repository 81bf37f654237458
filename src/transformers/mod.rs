/*! Text transformers.

Transforms edition text before segmentation ([Normalizer], [Window], [SentenceScrambler])
or after reassembly ([Corruption]).

!*/

mod corrupt;
mod normalize;
mod scramble;
mod transform;
mod window;

pub use corrupt::{Corruption, EROSION_MARKER};
pub use normalize::{strip_delimiters, valid_chars, Normalizer, EXPANDED_ELLIPSIS};
pub use scramble::SentenceScrambler;
pub use transform::Transform;
pub use window::{Anchor, Window};

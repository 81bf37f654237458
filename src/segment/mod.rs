/*! Segmentation

Splits an edition into [Token]s following a declarative [Grammar].
Each token keeps its attached trailing separator, so that concatenating tokens gives back the input.
!*/
mod grammar;
mod segmenter;
mod token;

pub use grammar::{Grammar, Rule};
pub use segmenter::Segmenter;
pub use token::{Class, Token, TokenKind, LOST_MARKERS};

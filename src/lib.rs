//! # Lacuna
//!
//! Lacuna turns digital editions of ancient texts (papyri, inscriptions) into
//! instruction-tuning examples for language models.
//!
//! The main task is restoration: a span of legible text is hidden behind a
//! `[n letters missing]` placeholder and the model has to produce it back.
//! Dating and place attribution examples can be generated from record metadata.
//!
//! Editions are segmented into tokens by a declarative [segment::Grammar],
//! tokens are grouped into preserved/lost [runs], a [masking::MaskPolicy] picks the span,
//! and [transformers] optionally scramble and corrupt the text.
//!
//! ## Getting started
//!
//! ```sh
//! lacuna 0.1.0
//! Training data generation from ancient text editions.
//!
//! USAGE:
//!     lacuna <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     help      Prints this message or the help of the given subcommand(s)
//!     labels    Generate dating or place attribution examples
//!     sample    Length-stratified sampling of generated examples
//!     text      Generate text restoration examples
//! ```
pub mod document;
pub mod error;
pub mod example;
pub mod io;
pub mod masking;
pub mod pipelines;
pub mod retry;
pub mod runs;
pub mod segment;
pub mod stratify;
pub mod transformers;

/*! Masking

Span selection ([MaskPolicy]), masking ([masker]), and reassembly into the masked document ([Reassembler]).

A generation pass masks at most one [MaskSpan] per document,
and the reassembled text always holds at most one [Placeholder].
!*/
pub mod masker;
mod placeholder;
mod policy;
mod reassembler;

pub use placeholder::Placeholder;
pub use policy::{MaskPolicy, MaskSpan, SpanSize};
pub use reassembler::Reassembler;

/*!
# IO utilities

Edition records loading and training examples saving, both as JSON Lines.
!*/
pub mod reader;
pub mod writer;

pub use reader::JsonlReader;
pub use writer::ExampleWriter;

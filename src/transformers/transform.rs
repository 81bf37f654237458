//! Transform trait.
use rand::Rng;

pub trait Transform {
    /// Takes a text and returns its transformed version.
    ///
    /// Randomized transforms draw from `rng`, others ignore it.
    fn transform<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String;
}

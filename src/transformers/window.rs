//! Cuts long editions down to a window of characters.
use rand::Rng;

use super::Transform;

/// Where the window is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Beginning,
    Middle,
    End,
}

pub struct Window {
    size: usize,
}

impl Window {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Window of `text` at `anchor`. Texts that fit are returned unchanged.
    ///
    /// Glosses cut in half at either end are dropped, so the window may be
    /// slightly shorter than its size.
    pub fn cut(&self, text: &str, anchor: Anchor) -> String {
        let nb_chars = text.chars().count();
        if nb_chars <= self.size {
            return text.to_string();
        }

        let start = match anchor {
            Anchor::Beginning => 0,
            Anchor::Middle => (nb_chars / 2).saturating_sub(self.size / 2),
            Anchor::End => nb_chars - self.size,
        };

        let window: String = text.chars().skip(start).take(self.size).collect();
        trim_broken_glosses(&window).to_string()
    }
}

/// Remove a gloss tail at the start and a gloss head at the end.
fn trim_broken_glosses(text: &str) -> &str {
    let mut text = text;
    if let Some(close) = text.find('⟩') {
        if !text[..close].contains('⟨') {
            text = &text[close + '⟩'.len_utf8()..];
        }
    }
    if let Some(open) = text.rfind('⟨') {
        if !text[open..].contains('⟩') {
            text = &text[..open];
        }
    }
    text
}

impl Transform for Window {
    fn transform<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
        let anchor = match rng.gen_range(0..3) {
            0 => Anchor::Beginning,
            1 => Anchor::Middle,
            _ => Anchor::End,
        };
        self.cut(text, anchor)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn anchors() {
        let w = Window::new(4);
        let text = "αβγδεζηθικ";
        assert_eq!(w.cut(text, Anchor::Beginning), "αβγδ");
        assert_eq!(w.cut(text, Anchor::Middle), "δεζη");
        assert_eq!(w.cut(text, Anchor::End), "ηθικ");
    }

    #[test]
    fn broken_glosses() {
        let w = Window::new(6);
        let text = "α⟨ιβ⟩γδε⟨κ⟩ζ";
        assert_eq!(w.cut(text, Anchor::Beginning), "α⟨ιβ⟩γ");
        assert_eq!(w.cut(text, Anchor::End), "δε⟨κ⟩ζ");
        assert_eq!(w.cut("αβγδε⟨κλ⟩", Anchor::Beginning), "αβγδε");
        assert_eq!(w.cut("⟨ιβ⟩αβγδε⟨κλ⟩", Anchor::Middle), "αβγδε");
    }

    #[test]
    fn short_text() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = Window::new(749);
        assert_eq!(w.transform("αβγ", &mut rng), "αβγ");
    }

    #[test]
    fn random_anchor_has_window_size() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = Window::new(3);
        for _ in 0..20 {
            assert_eq!(w.transform("αβγδεζηθικ", &mut rng).chars().count(), 3);
        }
    }
}

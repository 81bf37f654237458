//! Bounded retries.
//!
//! An attempt returning `None` is discarded and tried again,
//! up to `max_tries` attempts. Giving up yields `None`.

/// Run `f` until it returns [Some], at most `max_tries` times.
///
/// `f` receives the attempt number, starting at 0.
pub fn attempt<T, F>(max_tries: usize, mut f: F) -> Option<T>
where
    F: FnMut(usize) -> Option<T>,
{
    (0..max_tries).find_map(|n| f(n))
}

/// Same as [attempt], for attempts that can fail.
///
/// The first error stops retrying and is returned.
pub fn try_attempt<T, E, F>(max_tries: usize, mut f: F) -> Result<Option<T>, E>
where
    F: FnMut(usize) -> Result<Option<T>, E>,
{
    for n in 0..max_tries {
        if let Some(v) = f(n)? {
            return Ok(Some(v));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeds_eventually() {
        let mut calls = 0;
        let r = attempt(5, |n| {
            calls += 1;
            (n == 2).then_some(n)
        });
        assert_eq!(r, Some(2));
        assert_eq!(calls, 3);
    }

    #[test]
    fn gives_up() {
        let mut calls = 0;
        let r: Option<()> = attempt(4, |_| {
            calls += 1;
            None
        });
        assert_eq!(r, None);
        assert_eq!(calls, 4);
    }

    #[test]
    fn zero_tries() {
        assert_eq!(attempt(0, |_| Some(1)), None);
    }

    #[test]
    fn errors_stop() {
        let mut calls = 0;
        let r: Result<Option<()>, &str> = try_attempt(10, |n| {
            calls += 1;
            if n == 1 {
                Err("boom")
            } else {
                Ok(None)
            }
        });
        assert_eq!(r, Err("boom"));
        assert_eq!(calls, 2);
    }
}
